//! Board events and notifiers.
//!
//! Events are emitted whenever the board's visible state changes so that a
//! UI can re-render, a log can be written, and so on.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use trellis_config::EntityKind;

use crate::fetch::FetchState;

/// Events emitted by a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
  /// An edit command changed the workflow state and was recorded.
  Edited { command: String },

  /// The most recent edit was undone.
  Undone,

  /// The most recently undone edit was redone.
  Redone,

  /// The load state of one entity list changed.
  FetchStateChanged { kind: EntityKind, state: FetchState },
}

/// Trait for receiving board events.
///
/// The board calls `notify` for each event; implementations decide what to
/// do with them.
pub trait BoardNotifier: Send + Sync {
  /// Called when a board event occurs.
  fn notify(&self, event: BoardEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl BoardNotifier for NoopNotifier {
  fn notify(&self, _event: BoardEvent) {}
}

/// A notifier that sends events to an unbounded channel.
///
/// Sending never blocks the board; a consumer that falls behind only grows
/// the queue.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<BoardEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<BoardEvent>) -> Self {
    Self { sender }
  }

  /// Create a notifier together with the receiving end of its channel.
  pub fn channel() -> (Self, mpsc::UnboundedReceiver<BoardEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self::new(sender), receiver)
  }
}

impl BoardNotifier for ChannelNotifier {
  fn notify(&self, event: BoardEvent) {
    // receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
