use serde::{Deserialize, Serialize};

/// Load lifecycle of one entity list: `unset -> waiting -> success | failure`.
///
/// Independent of the undo history; loads are never undone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchState {
  #[default]
  Unset,
  Waiting,
  Success,
  Failure,
}

/// What a UI should show, derived from both fetch states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
  /// At least one list is still loading.
  Loading,
  /// Nothing is loading but at least one list never arrived.
  NoData,
  /// Both lists loaded.
  Ready,
}

impl BoardStatus {
  pub fn from_fetch_states(actions: FetchState, triggers: FetchState) -> Self {
    if actions == FetchState::Waiting || triggers == FetchState::Waiting {
      BoardStatus::Loading
    } else if actions != FetchState::Success || triggers != FetchState::Success {
      BoardStatus::NoData
    } else {
      BoardStatus::Ready
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use FetchState::*;

  #[test]
  fn test_waiting_wins() {
    assert_eq!(
      BoardStatus::from_fetch_states(Waiting, Failure),
      BoardStatus::Loading
    );
    assert_eq!(
      BoardStatus::from_fetch_states(Success, Waiting),
      BoardStatus::Loading
    );
  }

  #[test]
  fn test_no_data_unless_both_succeed() {
    assert_eq!(
      BoardStatus::from_fetch_states(Unset, Unset),
      BoardStatus::NoData
    );
    assert_eq!(
      BoardStatus::from_fetch_states(Success, Failure),
      BoardStatus::NoData
    );
  }

  #[test]
  fn test_ready() {
    assert_eq!(
      BoardStatus::from_fetch_states(Success, Success),
      BoardStatus::Ready
    );
  }
}
