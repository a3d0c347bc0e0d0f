use indexmap::IndexMap;
use serde::Serialize;
use trellis_config::{EntityDef, Id};

use crate::entity::{Action, Connection, Trigger};
use crate::error::WorkflowError;

/// Actions keyed by id, in the order they were first added.
pub type ActionMap = IndexMap<Id, Action>;

/// Triggers keyed by id, in the order they were first added.
pub type TriggerMap = IndexMap<Id, Trigger>;

/// The actions and triggers on a board, kept mutually paired.
///
/// Cloning produces a fully independent copy, which is what the history
/// stores as a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowState {
  action_map: ActionMap,
  trigger_map: TriggerMap,
}

impl WorkflowState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn action_map(&self) -> &ActionMap {
    &self.action_map
  }

  pub fn trigger_map(&self) -> &TriggerMap {
    &self.trigger_map
  }

  pub fn action(&self, id: &str) -> Option<&Action> {
    self.action_map.get(id)
  }

  pub fn trigger(&self, id: &str) -> Option<&Trigger> {
    self.trigger_map.get(id)
  }

  pub fn is_empty(&self) -> bool {
    self.action_map.is_empty() && self.trigger_map.is_empty()
  }

  /// Insert an action, replacing any action with the same id.
  ///
  /// A replaced action's connection is severed first, so its former trigger
  /// ends up unconnected. The new action starts unconnected and keeps the
  /// replaced entry's position.
  pub fn add_action(&mut self, def: EntityDef) {
    self.sever_action(&def.id);
    self.action_map.insert(def.id.clone(), Action::from(def));
  }

  /// Insert a trigger, replacing any trigger with the same id.
  pub fn add_trigger(&mut self, def: EntityDef) {
    self.sever_trigger(&def.id);
    self.trigger_map.insert(def.id.clone(), Trigger::from(def));
  }

  /// Remove an action and clear its trigger's pointer. Unknown ids are ignored.
  ///
  /// Returns whether an action was removed.
  pub fn remove_action_by_id(&mut self, id: &str) -> bool {
    self.sever_action(id);
    self.action_map.shift_remove(id).is_some()
  }

  /// Remove a trigger and clear its action's pointer. Unknown ids are ignored.
  pub fn remove_trigger_by_id(&mut self, id: &str) -> bool {
    self.sever_trigger(id);
    self.trigger_map.shift_remove(id).is_some()
  }

  /// Pair an action with a trigger.
  ///
  /// Any existing pairing on either side is severed first. If either id is
  /// unknown nothing changes and `false` is returned.
  pub fn connect(&mut self, action_id: &str, trigger_id: &str) -> bool {
    if !self.action_map.contains_key(action_id) || !self.trigger_map.contains_key(trigger_id) {
      return false;
    }

    self.sever_action(action_id);
    self.sever_trigger(trigger_id);

    if let Some(action) = self.action_map.get_mut(action_id) {
      action.trigger_id = Some(trigger_id.to_string());
    }
    if let Some(trigger) = self.trigger_map.get_mut(trigger_id) {
      trigger.action_id = Some(action_id.to_string());
    }
    true
  }

  /// Clear the connections of the named action and the named trigger.
  ///
  /// The two need not be paired with each other: each side's own pairing is
  /// severed, including the back-pointer on its counterpart. Unknown ids are
  /// skipped.
  pub fn disconnect(&mut self, action_id: &str, trigger_id: &str) {
    self.sever_action(action_id);
    self.sever_trigger(trigger_id);
  }

  /// Replace every action with a freshly loaded, unconnected set.
  ///
  /// Triggers lose their pointers since none of the loaded actions is paired.
  /// Later duplicates of an id replace earlier ones.
  pub fn set_actions(&mut self, defs: impl IntoIterator<Item = EntityDef>) {
    self.action_map = defs
      .into_iter()
      .map(|def| (def.id.clone(), Action::from(def)))
      .collect();
    for trigger in self.trigger_map.values_mut() {
      trigger.action_id = None;
    }
  }

  /// Replace every trigger with a freshly loaded, unconnected set.
  pub fn set_triggers(&mut self, defs: impl IntoIterator<Item = EntityDef>) {
    self.trigger_map = defs
      .into_iter()
      .map(|def| (def.id.clone(), Trigger::from(def)))
      .collect();
    for action in self.action_map.values_mut() {
      action.trigger_id = None;
    }
  }

  /// Current connections, in trigger order.
  pub fn connections(&self) -> Vec<Connection> {
    self
      .trigger_map
      .values()
      .filter_map(|trigger| {
        trigger.action_id.as_ref().map(|action_id| Connection {
          action_id: action_id.clone(),
          trigger_id: trigger.id.clone(),
        })
      })
      .collect()
  }

  /// Check that every pointer has a matching back-pointer.
  pub fn validate(&self) -> Result<(), WorkflowError> {
    for action in self.action_map.values() {
      let Some(trigger_id) = &action.trigger_id else {
        continue;
      };
      match self.trigger_map.get(trigger_id) {
        None => {
          return Err(WorkflowError::DanglingAction {
            action_id: action.id.clone(),
            trigger_id: trigger_id.clone(),
          });
        }
        Some(trigger) if trigger.action_id.as_deref() != Some(action.id.as_str()) => {
          return Err(WorkflowError::MismatchedPair {
            action_id: action.id.clone(),
            trigger_id: trigger_id.clone(),
          });
        }
        Some(_) => {}
      }
    }

    for trigger in self.trigger_map.values() {
      let Some(action_id) = &trigger.action_id else {
        continue;
      };
      match self.action_map.get(action_id) {
        None => {
          return Err(WorkflowError::DanglingTrigger {
            trigger_id: trigger.id.clone(),
            action_id: action_id.clone(),
          });
        }
        Some(action) if action.trigger_id.as_deref() != Some(trigger.id.as_str()) => {
          return Err(WorkflowError::MismatchedPair {
            action_id: action_id.clone(),
            trigger_id: trigger.id.clone(),
          });
        }
        Some(_) => {}
      }
    }

    Ok(())
  }

  /// Clear an action's pointer and its trigger's back-pointer.
  fn sever_action(&mut self, action_id: &str) {
    let Some(trigger_id) = self
      .action_map
      .get_mut(action_id)
      .and_then(|action| action.trigger_id.take())
    else {
      return;
    };
    if let Some(trigger) = self.trigger_map.get_mut(&trigger_id)
      && trigger.action_id.as_deref() == Some(action_id)
    {
      trigger.action_id = None;
    }
  }

  /// Clear a trigger's pointer and its action's back-pointer.
  fn sever_trigger(&mut self, trigger_id: &str) {
    let Some(action_id) = self
      .trigger_map
      .get_mut(trigger_id)
      .and_then(|trigger| trigger.action_id.take())
    else {
      return;
    };
    if let Some(action) = self.action_map.get_mut(&action_id)
      && action.trigger_id.as_deref() == Some(trigger_id)
    {
      action.trigger_id = None;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::{Rng, SeedableRng};

  fn def(id: &str) -> EntityDef {
    EntityDef::new(id, id.to_uppercase())
  }

  fn state_with(actions: &[&str], triggers: &[&str]) -> WorkflowState {
    let mut state = WorkflowState::new();
    for id in actions {
      state.add_action(def(id));
    }
    for id in triggers {
      state.add_trigger(def(id));
    }
    state
  }

  fn trigger_of(state: &WorkflowState, action_id: &str) -> Option<String> {
    state.action(action_id).and_then(|a| a.trigger_id.clone())
  }

  fn action_of(state: &WorkflowState, trigger_id: &str) -> Option<String> {
    state.trigger(trigger_id).and_then(|t| t.action_id.clone())
  }

  #[test]
  fn test_connect_pairs_both_sides() {
    let mut state = state_with(&["a1"], &["t1"]);

    assert!(state.connect("a1", "t1"));
    assert_eq!(trigger_of(&state, "a1").as_deref(), Some("t1"));
    assert_eq!(action_of(&state, "t1").as_deref(), Some("a1"));
    assert!(state.validate().is_ok());
  }

  #[test]
  fn test_reconnect_action_releases_old_trigger() {
    let mut state = state_with(&["a"], &["t", "t2"]);
    state.connect("a", "t");
    state.connect("a", "t2");

    assert_eq!(action_of(&state, "t"), None);
    assert_eq!(action_of(&state, "t2").as_deref(), Some("a"));
    assert_eq!(trigger_of(&state, "a").as_deref(), Some("t2"));
    assert!(state.validate().is_ok());
  }

  #[test]
  fn test_reconnect_trigger_releases_old_action() {
    let mut state = state_with(&["a1", "a2"], &["t"]);
    state.connect("a1", "t");
    state.connect("a2", "t");

    assert_eq!(trigger_of(&state, "a1"), None);
    assert_eq!(trigger_of(&state, "a2").as_deref(), Some("t"));
    assert_eq!(action_of(&state, "t").as_deref(), Some("a2"));
  }

  #[test]
  fn test_connect_unknown_is_noop() {
    let mut state = state_with(&["a1"], &["t1"]);
    state.connect("a1", "t1");
    let before = state.clone();

    assert!(!state.connect("missing", "t1"));
    assert!(!state.connect("a1", "missing"));
    assert_eq!(state, before);
  }

  #[test]
  fn test_disconnect_pair() {
    let mut state = state_with(&["a1"], &["t1"]);
    state.connect("a1", "t1");
    state.disconnect("a1", "t1");

    assert_eq!(trigger_of(&state, "a1"), None);
    assert_eq!(action_of(&state, "t1"), None);
  }

  #[test]
  fn test_disconnect_unpaired_entities_severs_each_side() {
    let mut state = state_with(&["a1", "a2"], &["t1", "t2"]);
    state.connect("a1", "t1");
    state.connect("a2", "t2");

    state.disconnect("a1", "t2");

    assert!(state.connections().is_empty());
    assert!(state.validate().is_ok());
  }

  #[test]
  fn test_disconnect_unknown_ids() {
    let mut state = state_with(&["a1"], &["t1"]);
    state.connect("a1", "t1");
    let before = state.clone();

    state.disconnect("nope", "nada");
    assert_eq!(state, before);
  }

  #[test]
  fn test_remove_action_clears_trigger() {
    let mut state = state_with(&["a1"], &["t1"]);
    state.connect("a1", "t1");

    assert!(state.remove_action_by_id("a1"));
    assert!(state.action("a1").is_none());
    assert_eq!(action_of(&state, "t1"), None);
  }

  #[test]
  fn test_remove_trigger_clears_action() {
    let mut state = state_with(&["a1"], &["t1"]);
    state.connect("a1", "t1");

    assert!(state.remove_trigger_by_id("t1"));
    assert_eq!(trigger_of(&state, "a1"), None);
    assert!(state.validate().is_ok());
  }

  #[test]
  fn test_remove_unknown_is_noop() {
    let mut state = state_with(&["a1"], &["t1"]);
    let before = state.clone();

    assert!(!state.remove_action_by_id("zzz"));
    assert!(!state.remove_trigger_by_id("zzz"));
    assert_eq!(state, before);
  }

  #[test]
  fn test_overwrite_action_orphans_counterpart() {
    let mut state = state_with(&["a1", "a2"], &["t1"]);
    state.connect("a1", "t1");

    state.add_action(EntityDef::new("a1", "renamed"));

    let action = state.action("a1").unwrap();
    assert_eq!(action.name, "renamed");
    assert_eq!(action.trigger_id, None);
    assert_eq!(action_of(&state, "t1"), None);
    // position of the overwritten id is kept
    assert_eq!(state.action_map().get_index_of("a1"), Some(0));
    assert!(state.validate().is_ok());
  }

  #[test]
  fn test_overwrite_trigger_orphans_counterpart() {
    let mut state = state_with(&["a1"], &["t1"]);
    state.connect("a1", "t1");

    state.add_trigger(EntityDef::new("t1", "again"));

    assert_eq!(trigger_of(&state, "a1"), None);
    assert!(state.validate().is_ok());
  }

  #[test]
  fn test_set_actions_replaces_and_clears_trigger_pointers() {
    let mut state = state_with(&["a1"], &["t1"]);
    state.connect("a1", "t1");

    state.set_actions(vec![def("b1"), def("b2"), EntityDef::new("b1", "dup")]);

    let ids: Vec<&String> = state.action_map().keys().collect();
    assert_eq!(ids, vec!["b1", "b2"]);
    assert_eq!(state.action("b1").unwrap().name, "dup");
    assert_eq!(action_of(&state, "t1"), None);
    assert!(state.validate().is_ok());
  }

  #[test]
  fn test_set_triggers_clears_action_pointers() {
    let mut state = state_with(&["a1"], &["t1"]);
    state.connect("a1", "t1");

    state.set_triggers(vec![def("t1")]);

    assert_eq!(trigger_of(&state, "a1"), None);
    assert!(state.validate().is_ok());
  }

  #[test]
  fn test_connections_follow_trigger_order() {
    let mut state = state_with(&["a1", "a2"], &["t1", "t2"]);
    state.connect("a1", "t2");
    state.connect("a2", "t1");

    let connections = state.connections();
    assert_eq!(
      connections,
      vec![
        Connection {
          action_id: "a2".to_string(),
          trigger_id: "t1".to_string(),
        },
        Connection {
          action_id: "a1".to_string(),
          trigger_id: "t2".to_string(),
        },
      ]
    );
  }

  #[test]
  fn test_clone_is_independent() {
    let mut state = state_with(&["a1"], &["t1"]);
    let snapshot = state.clone();

    state.connect("a1", "t1");

    assert_eq!(snapshot.action("a1").unwrap().trigger_id, None);
    assert_ne!(snapshot, state);
  }

  #[test]
  fn test_serialize_omits_empty_pointers() {
    let mut state = state_with(&["a1"], &["t1", "t2"]);
    state.connect("a1", "t1");

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["action_map"]["a1"]["trigger_id"], "t1");
    assert!(json["trigger_map"]["t2"].get("action_id").is_none());
  }

  #[test]
  fn test_validate_reports_dangling_pointer() {
    let mut state = state_with(&["a1"], &["t1"]);
    state.connect("a1", "t1");
    state.trigger_map.shift_remove("t1");

    assert_eq!(
      state.validate(),
      Err(WorkflowError::DanglingAction {
        action_id: "a1".to_string(),
        trigger_id: "t1".to_string(),
      })
    );
  }

  #[test]
  fn test_validate_reports_mismatched_pair() {
    let mut state = state_with(&["a1", "a2"], &["t1"]);
    state.connect("a1", "t1");
    state.action_map.get_mut("a2").unwrap().trigger_id = Some("t1".to_string());

    assert!(matches!(
      state.validate(),
      Err(WorkflowError::MismatchedPair { .. })
    ));
  }

  #[test]
  fn test_invariant_holds_for_random_edits() {
    let actions = ["a0", "a1", "a2", "a3"];
    let triggers = ["t0", "t1", "t2", "t3"];
    let mut rng = StdRng::seed_from_u64(0x7e11);
    let mut state = state_with(&actions, &triggers);

    for _ in 0..2000 {
      let a = actions[rng.random_range(0..actions.len())];
      let t = triggers[rng.random_range(0..triggers.len())];
      match rng.random_range(0..6) {
        0 | 1 => {
          state.connect(a, t);
        }
        2 => state.disconnect(a, t),
        3 => {
          state.remove_action_by_id(a);
        }
        4 => {
          state.remove_trigger_by_id(t);
        }
        _ => {
          state.add_action(def(a));
          state.add_trigger(def(t));
        }
      }

      assert_eq!(state.validate(), Ok(()));
      let connections = state.connections();
      for connection in &connections {
        let paired_actions = connections
          .iter()
          .filter(|c| c.action_id == connection.action_id)
          .count();
        assert_eq!(paired_actions, 1);
      }
    }
  }
}
