use serde::Serialize;
use tracing::{debug, info, warn};
use trellis_config::{Command, ConnectionDef, EntityDef, EntityKind};
use trellis_history::{History, HistoryConfig};
use trellis_workflow::{ActionMap, Layout, TriggerMap, WorkflowState};

use crate::events::{BoardEvent, BoardNotifier, NoopNotifier};
use crate::fetch::{BoardStatus, FetchState};

/// The single owner of a board's workflow state.
///
/// Every edit goes through one of the command methods, which record it in the
/// undo history. Loads replace a whole entity list without being recorded.
/// Commands never fail: unknown ids and empty history degrade to no-ops, and
/// each command returns whether the state changed.
///
/// Generic over `N: BoardNotifier` so callers can observe changes. Use
/// `Board::new()` for a board that discards events.
pub struct Board<N: BoardNotifier = NoopNotifier> {
  history: History<WorkflowState>,
  action_fetch: FetchState,
  trigger_fetch: FetchState,
  notifier: N,
}

impl Board<NoopNotifier> {
  pub fn new() -> Self {
    Self::with_config(HistoryConfig::default())
  }

  pub fn with_config(config: HistoryConfig) -> Self {
    Self::with_notifier(config, NoopNotifier)
  }
}

impl Default for Board<NoopNotifier> {
  fn default() -> Self {
    Self::new()
  }
}

impl<N: BoardNotifier> Board<N> {
  pub fn with_notifier(config: HistoryConfig, notifier: N) -> Self {
    Self {
      history: History::with_config(WorkflowState::new(), config),
      action_fetch: FetchState::Unset,
      trigger_fetch: FetchState::Unset,
      notifier,
    }
  }

  pub fn add_action(&mut self, def: EntityDef) -> bool {
    self.apply(Command::AddAction { entity: def })
  }

  pub fn add_trigger(&mut self, def: EntityDef) -> bool {
    self.apply(Command::AddTrigger { entity: def })
  }

  pub fn remove_action_by_id(&mut self, id: &str) -> bool {
    self.apply(Command::RemoveAction { id: id.to_string() })
  }

  pub fn remove_trigger_by_id(&mut self, id: &str) -> bool {
    self.apply(Command::RemoveTrigger { id: id.to_string() })
  }

  pub fn connect(&mut self, action_id: &str, trigger_id: &str) -> bool {
    self.apply(Command::Connect {
      connection: ConnectionDef::new(action_id, trigger_id),
    })
  }

  pub fn disconnect(&mut self, action_id: &str, trigger_id: &str) -> bool {
    self.apply(Command::Disconnect {
      connection: ConnectionDef::new(action_id, trigger_id),
    })
  }

  pub fn undo(&mut self) -> bool {
    self.apply(Command::Undo)
  }

  pub fn redo(&mut self) -> bool {
    self.apply(Command::Redo)
  }

  /// Dispatch a command from the UI layer.
  ///
  /// Entities with an empty id or name are ignored with a warning.
  pub fn apply(&mut self, command: Command) -> bool {
    let name = command.name();
    match command {
      Command::AddAction { entity } => match entity.validate() {
        Ok(()) => self.record(name, |state| state.add_action(entity)),
        Err(e) => {
          warn!(command = name, error = %e, "ignoring invalid entity");
          false
        }
      },
      Command::AddTrigger { entity } => match entity.validate() {
        Ok(()) => self.record(name, |state| state.add_trigger(entity)),
        Err(e) => {
          warn!(command = name, error = %e, "ignoring invalid entity");
          false
        }
      },
      Command::RemoveAction { id } => self.record(name, |state| {
        state.remove_action_by_id(&id);
      }),
      Command::RemoveTrigger { id } => self.record(name, |state| {
        state.remove_trigger_by_id(&id);
      }),
      Command::Connect { connection } => self.record(name, |state| {
        state.connect(&connection.action_id, &connection.trigger_id);
      }),
      Command::Disconnect { connection } => self.record(name, |state| {
        state.disconnect(&connection.action_id, &connection.trigger_id)
      }),
      Command::Undo => {
        let undone = self.history.undo();
        if undone {
          debug!(command = name, past = self.history.past().len(), "restored snapshot");
          self.notifier.notify(BoardEvent::Undone);
        }
        undone
      }
      Command::Redo => {
        let redone = self.history.redo();
        if redone {
          debug!(command = name, future = self.history.future().len(), "restored snapshot");
          self.notifier.notify(BoardEvent::Redone);
        }
        redone
      }
    }
  }

  /// Mark a list as loading.
  pub fn begin_fetch(&mut self, kind: EntityKind) {
    self.set_fetch_state(kind, FetchState::Waiting);
  }

  /// Mark a list as failed to load. The entities already on the board stay.
  pub fn fail_fetch(&mut self, kind: EntityKind) {
    self.set_fetch_state(kind, FetchState::Failure);
  }

  /// Replace every action with a loaded list and mark the load successful.
  ///
  /// This is a reset, not an edit: no snapshot is recorded for it. Snapshots
  /// taken before the load stay in the history, so undoing an earlier edit
  /// restores the state from before the load as well.
  pub fn set_actions(&mut self, defs: Vec<EntityDef>) {
    let defs = valid_only(EntityKind::Action, defs);
    info!(count = defs.len(), "actions loaded");
    self.history.reset(|state| state.set_actions(defs));
    self.set_fetch_state(EntityKind::Action, FetchState::Success);
  }

  /// Replace every trigger with a loaded list and mark the load successful.
  ///
  /// Not recorded; see [`Board::set_actions`].
  pub fn set_triggers(&mut self, defs: Vec<EntityDef>) {
    let defs = valid_only(EntityKind::Trigger, defs);
    info!(count = defs.len(), "triggers loaded");
    self.history.reset(|state| state.set_triggers(defs));
    self.set_fetch_state(EntityKind::Trigger, FetchState::Success);
  }

  pub fn state(&self) -> &WorkflowState {
    self.history.current()
  }

  pub fn action_map(&self) -> &ActionMap {
    self.state().action_map()
  }

  pub fn trigger_map(&self) -> &TriggerMap {
    self.state().trigger_map()
  }

  pub fn layout(&self) -> Layout {
    Layout::of(self.state())
  }

  pub fn fetch_state(&self, kind: EntityKind) -> FetchState {
    match kind {
      EntityKind::Action => self.action_fetch,
      EntityKind::Trigger => self.trigger_fetch,
    }
  }

  pub fn status(&self) -> BoardStatus {
    BoardStatus::from_fetch_states(self.action_fetch, self.trigger_fetch)
  }

  pub fn can_undo(&self) -> bool {
    self.history.can_undo()
  }

  pub fn can_redo(&self) -> bool {
    self.history.can_redo()
  }

  pub fn history(&self) -> &History<WorkflowState> {
    &self.history
  }

  /// A serializable view of everything a UI renders.
  pub fn snapshot(&self) -> BoardSnapshot<'_> {
    BoardSnapshot {
      status: self.status(),
      action_fetch: self.action_fetch,
      trigger_fetch: self.trigger_fetch,
      can_undo: self.can_undo(),
      can_redo: self.can_redo(),
      layout: self.layout(),
      state: self.state(),
    }
  }

  fn record<F>(&mut self, command: &'static str, edit: F) -> bool
  where
    F: FnOnce(&mut WorkflowState),
  {
    let changed = self.history.record(edit);
    debug_assert_eq!(self.history.current().validate(), Ok(()));

    if changed {
      debug!(command, past = self.history.past().len(), "recorded edit");
      self.notifier.notify(BoardEvent::Edited {
        command: command.to_string(),
      });
    } else {
      debug!(command, "edit left state unchanged");
    }
    changed
  }

  fn set_fetch_state(&mut self, kind: EntityKind, state: FetchState) {
    let slot = match kind {
      EntityKind::Action => &mut self.action_fetch,
      EntityKind::Trigger => &mut self.trigger_fetch,
    };
    if *slot == state {
      return;
    }
    *slot = state;
    self
      .notifier
      .notify(BoardEvent::FetchStateChanged { kind, state });
  }
}

/// Everything a UI needs to render a board.
#[derive(Debug, Serialize)]
pub struct BoardSnapshot<'a> {
  pub status: BoardStatus,
  pub action_fetch: FetchState,
  pub trigger_fetch: FetchState,
  pub can_undo: bool,
  pub can_redo: bool,
  pub layout: Layout,
  pub state: &'a WorkflowState,
}

fn valid_only(kind: EntityKind, defs: Vec<EntityDef>) -> Vec<EntityDef> {
  defs
    .into_iter()
    .filter(|def| match def.validate() {
      Ok(()) => true,
      Err(e) => {
        warn!(%kind, error = %e, "dropping invalid loaded entity");
        false
      }
    })
    .collect()
}
