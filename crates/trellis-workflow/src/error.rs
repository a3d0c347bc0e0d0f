use thiserror::Error;

/// A broken pairing found by [`WorkflowState::validate`](crate::WorkflowState::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
  #[error("action '{action_id}' points at unknown trigger '{trigger_id}'")]
  DanglingAction {
    action_id: String,
    trigger_id: String,
  },

  #[error("trigger '{trigger_id}' points at unknown action '{action_id}'")]
  DanglingTrigger {
    trigger_id: String,
    action_id: String,
  },

  #[error("action '{action_id}' points at trigger '{trigger_id}' which points elsewhere")]
  MismatchedPair {
    action_id: String,
    trigger_id: String,
  },
}
