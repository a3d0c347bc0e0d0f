use serde::{Deserialize, Serialize};
use trellis_config::{EntityDef, Id};

/// Something the workflow performs. Paired with at most one trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
  pub id: Id,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub trigger_id: Option<Id>,
}

/// A condition that starts a workflow. Paired with at most one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
  pub id: Id,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub action_id: Option<Id>,
}

impl From<EntityDef> for Action {
  fn from(def: EntityDef) -> Self {
    Self {
      id: def.id,
      name: def.name,
      trigger_id: None,
    }
  }
}

impl From<EntityDef> for Trigger {
  fn from(def: EntityDef) -> Self {
    Self {
      id: def.id,
      name: def.name,
      action_id: None,
    }
  }
}

/// A mutual pairing, derived from the two maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
  pub action_id: Id,
  pub trigger_id: Id,
}
