use tracing::{error, info};
use trellis_config::EntityKind;
use trellis_source::{EntitySource, SourceError};

use crate::board::Board;
use crate::events::BoardNotifier;

/// Outcome of [`load`]. Each list succeeds or fails on its own.
#[derive(Debug, Default)]
pub struct LoadReport {
  pub action_error: Option<SourceError>,
  pub trigger_error: Option<SourceError>,
}

impl LoadReport {
  /// Both lists arrived.
  pub fn is_complete(&self) -> bool {
    self.action_error.is_none() && self.trigger_error.is_none()
  }

  pub fn errors(&self) -> impl Iterator<Item = &SourceError> {
    self.action_error.iter().chain(self.trigger_error.iter())
  }
}

/// Fetch both entity lists concurrently and feed the results into the board.
///
/// Both fetch states go to waiting first. A successful list replaces the
/// board's entities of that kind; a failed one is recorded as a failure and
/// left for the caller to retry.
pub async fn load<N, S>(board: &mut Board<N>, source: &S) -> LoadReport
where
  N: BoardNotifier,
  S: EntitySource + ?Sized,
{
  board.begin_fetch(EntityKind::Action);
  board.begin_fetch(EntityKind::Trigger);

  let (actions, triggers) = tokio::join!(source.fetch_actions(), source.fetch_triggers());

  let mut report = LoadReport::default();

  match actions {
    Ok(defs) => board.set_actions(defs),
    Err(e) => {
      error!(error = %e, "failed to load actions");
      board.fail_fetch(EntityKind::Action);
      report.action_error = Some(e);
    }
  }

  match triggers {
    Ok(defs) => board.set_triggers(defs),
    Err(e) => {
      error!(error = %e, "failed to load triggers");
      board.fail_fetch(EntityKind::Trigger);
      report.trigger_error = Some(e);
    }
  }

  info!(status = ?board.status(), "board load finished");
  report
}
