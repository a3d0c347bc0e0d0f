use serde::{Deserialize, Serialize};
use tracing::trace;

/// Limits applied to a [`History`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
  /// Maximum number of undo snapshots kept. `None` keeps every snapshot.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub max_depth: Option<usize>,
}

/// A value with a linear undo/redo timeline.
///
/// `past` and `future` are ordered oldest to newest; the last element of each
/// is the next one restored by `undo` or `redo` respectively.
#[derive(Debug, Clone)]
pub struct History<T> {
  current: T,
  past: Vec<T>,
  future: Vec<T>,
  config: HistoryConfig,
}

impl<T: Default> Default for History<T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}

impl<T> History<T> {
  pub fn new(initial: T) -> Self {
    Self::with_config(initial, HistoryConfig::default())
  }

  pub fn with_config(initial: T, config: HistoryConfig) -> Self {
    Self {
      current: initial,
      past: Vec::new(),
      future: Vec::new(),
      config,
    }
  }

  pub fn current(&self) -> &T {
    &self.current
  }

  pub fn past(&self) -> &[T] {
    &self.past
  }

  pub fn future(&self) -> &[T] {
    &self.future
  }

  pub fn can_undo(&self) -> bool {
    !self.past.is_empty()
  }

  pub fn can_redo(&self) -> bool {
    !self.future.is_empty()
  }

  /// Restore the most recent past snapshot. Returns `false` if there is none.
  pub fn undo(&mut self) -> bool {
    let Some(previous) = self.past.pop() else {
      return false;
    };
    let undone = std::mem::replace(&mut self.current, previous);
    self.future.push(undone);
    true
  }

  /// Restore the most recently undone snapshot. Returns `false` if there is none.
  pub fn redo(&mut self) -> bool {
    let Some(next) = self.future.pop() else {
      return false;
    };
    let redone = std::mem::replace(&mut self.current, next);
    self.past.push(redone);
    self.evict();
    true
  }

  /// Edit the current value in place without touching either stack.
  pub fn reset<F>(&mut self, edit: F)
  where
    F: FnOnce(&mut T),
  {
    edit(&mut self.current);
  }

  fn evict(&mut self) {
    if let Some(max_depth) = self.config.max_depth
      && self.past.len() > max_depth
    {
      let excess = self.past.len() - max_depth;
      self.past.drain(..excess);
      trace!(evicted = excess, max_depth, "evicted oldest history snapshots");
    }
  }
}

impl<T: Clone + PartialEq> History<T> {
  /// Apply an edit to a copy of the current value and record it.
  ///
  /// If the edit leaves the value unchanged nothing is recorded: no snapshot
  /// is pushed and the redo stack survives. Otherwise the previous value is
  /// pushed onto `past`, `future` is cleared, and `true` is returned.
  pub fn record<F>(&mut self, edit: F) -> bool
  where
    F: FnOnce(&mut T),
  {
    let mut next = self.current.clone();
    edit(&mut next);
    if next == self.current {
      return false;
    }

    let previous = std::mem::replace(&mut self.current, next);
    self.past.push(previous);
    self.future.clear();
    self.evict();
    true
  }
}
