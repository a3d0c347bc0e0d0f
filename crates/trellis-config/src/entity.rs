use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Identifier of an action or trigger. Each kind has its own namespace.
pub type Id = String;

/// The two disjoint kinds of entity placed on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
  Action,
  Trigger,
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EntityKind::Action => f.write_str("action"),
      EntityKind::Trigger => f.write_str("trigger"),
    }
  }
}

/// An entity as supplied by a caller or a data source, before it is placed.
///
/// Loaded and newly added entities never carry a connection; pairing only
/// happens through the board's connect command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDef {
  pub id: Id,
  pub name: String,
}

impl EntityDef {
  pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
    }
  }

  /// Check that both the id and the name are non-empty.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.id.is_empty() {
      return Err(ConfigError::EmptyId);
    }
    if self.name.is_empty() {
      return Err(ConfigError::EmptyName {
        id: self.id.clone(),
      });
    }
    Ok(())
  }
}

/// A requested pairing between an action and a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionDef {
  pub action_id: Id,
  pub trigger_id: Id,
}

impl ConnectionDef {
  pub fn new(action_id: impl Into<Id>, trigger_id: impl Into<Id>) -> Self {
    Self {
      action_id: action_id.into(),
      trigger_id: trigger_id.into(),
    }
  }
}
