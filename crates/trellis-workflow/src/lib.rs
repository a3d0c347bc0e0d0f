//! Trellis Workflow
//!
//! This crate provides the in-memory workflow state for Trellis: the actions
//! and triggers placed on a board and the connections between them.
//!
//! A connection pairs exactly one action with exactly one trigger. It is not
//! stored on its own; both sides hold a pointer to the other and
//! [`WorkflowState`] keeps them in agreement:
//! - every `action.trigger_id` names an existing trigger pointing back
//! - every `trigger.action_id` names an existing action pointing back
//! - no entity takes part in more than one connection
//!
//! The maps are private to [`WorkflowState`]; all edits go through its
//! methods so the pairing can never be left dangling.

mod entity;
mod error;
mod layout;
mod state;

pub use entity::{Action, Connection, Trigger};
pub use error::WorkflowError;
pub use layout::{Layout, Partition};
pub use state::{ActionMap, TriggerMap, WorkflowState};
