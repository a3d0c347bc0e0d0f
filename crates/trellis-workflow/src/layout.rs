use serde::Serialize;
use trellis_config::Id;

use crate::entity::Connection;
use crate::state::WorkflowState;

/// Ids of one entity kind, split by whether they are connected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
  pub connected: Vec<Id>,
  pub unconnected: Vec<Id>,
}

impl Partition {
  /// Connected ids first, then unconnected ones.
  pub fn ordered(&self) -> impl Iterator<Item = &Id> {
    self.connected.iter().chain(self.unconnected.iter())
  }

  pub fn len(&self) -> usize {
    self.connected.len() + self.unconnected.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Display order for the two lists and the lines drawn between them.
///
/// Connected triggers keep their map order; connected actions are listed in
/// the order of their triggers so that paired entities line up row by row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Layout {
  pub triggers: Partition,
  pub actions: Partition,
  pub connections: Vec<Connection>,
}

impl Layout {
  /// Build the layout for a state.
  pub fn of(state: &WorkflowState) -> Self {
    let mut triggers = Partition::default();
    let mut actions = Partition::default();
    let mut connections = Vec::new();

    for trigger in state.trigger_map().values() {
      match &trigger.action_id {
        Some(action_id) => {
          triggers.connected.push(trigger.id.clone());
          actions.connected.push(action_id.clone());
          connections.push(Connection {
            action_id: action_id.clone(),
            trigger_id: trigger.id.clone(),
          });
        }
        None => triggers.unconnected.push(trigger.id.clone()),
      }
    }

    actions.unconnected = state
      .action_map()
      .values()
      .filter(|action| action.trigger_id.is_none())
      .map(|action| action.id.clone())
      .collect();

    Self {
      triggers,
      actions,
      connections,
    }
  }

  /// Trigger ids in display order.
  pub fn trigger_order(&self) -> Vec<Id> {
    self.triggers.ordered().cloned().collect()
  }

  /// Action ids in display order.
  pub fn action_order(&self) -> Vec<Id> {
    self.actions.ordered().cloned().collect()
  }
}
