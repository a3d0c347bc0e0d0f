use serde::{Deserialize, Serialize};

use crate::entity::{ConnectionDef, EntityDef, Id};
use crate::error::ConfigError;

/// A command issued by the UI layer.
///
/// Serialized with an internal `type` tag, e.g.
/// `{"type": "connect", "action_id": "a1", "trigger_id": "t1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
  AddAction {
    #[serde(flatten)]
    entity: EntityDef,
  },
  AddTrigger {
    #[serde(flatten)]
    entity: EntityDef,
  },
  RemoveAction {
    id: Id,
  },
  RemoveTrigger {
    id: Id,
  },
  Connect {
    #[serde(flatten)]
    connection: ConnectionDef,
  },
  Disconnect {
    #[serde(flatten)]
    connection: ConnectionDef,
  },
  Undo,
  Redo,
}

impl Command {
  /// Short, stable name used in log fields and events.
  pub fn name(&self) -> &'static str {
    match self {
      Command::AddAction { .. } => "add_action",
      Command::AddTrigger { .. } => "add_trigger",
      Command::RemoveAction { .. } => "remove_action",
      Command::RemoveTrigger { .. } => "remove_trigger",
      Command::Connect { .. } => "connect",
      Command::Disconnect { .. } => "disconnect",
      Command::Undo => "undo",
      Command::Redo => "redo",
    }
  }
}

/// Parse a command script.
///
/// A script is either a JSON array of commands or newline-delimited JSON with
/// one command per line. Blank lines are skipped.
pub fn parse_script(input: &str) -> Result<Vec<Command>, ConfigError> {
  let trimmed = input.trim_start();
  if trimmed.starts_with('[') {
    return Ok(serde_json::from_str(trimmed)?);
  }

  input
    .lines()
    .enumerate()
    .filter(|(_, line)| !line.trim().is_empty())
    .map(|(idx, line)| {
      serde_json::from_str(line).map_err(|source| ConfigError::InvalidCommand {
        line: idx + 1,
        source,
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_deserialize_add_action() {
    let cmd: Command =
      serde_json::from_str(r#"{"type": "add_action", "id": "a1", "name": "A1"}"#).unwrap();
    assert_eq!(
      cmd,
      Command::AddAction {
        entity: EntityDef::new("a1", "A1")
      }
    );
  }

  #[test]
  fn test_deserialize_connect() {
    let cmd: Command =
      serde_json::from_str(r#"{"type": "connect", "action_id": "a1", "trigger_id": "t1"}"#)
        .unwrap();
    assert_eq!(
      cmd,
      Command::Connect {
        connection: ConnectionDef::new("a1", "t1"),
      }
    );
    assert_eq!(cmd.name(), "connect");
  }

  #[test]
  fn test_disconnect_serializes_flat() {
    let cmd = Command::Disconnect {
      connection: ConnectionDef::new("a1", "t1"),
    };
    let json = serde_json::to_value(&cmd).unwrap();
    assert_eq!(
      json,
      serde_json::json!({"type": "disconnect", "action_id": "a1", "trigger_id": "t1"})
    );
  }

  #[test]
  fn test_parse_script_array() {
    let script = r#"[
      {"type": "add_trigger", "id": "t1", "name": "T1"},
      {"type": "undo"}
    ]"#;
    let commands = parse_script(script).unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[1], Command::Undo);
  }

  #[test]
  fn test_parse_script_lines() {
    let script = "{\"type\": \"undo\"}\n\n{\"type\": \"redo\"}\n";
    let commands = parse_script(script).unwrap();
    assert_eq!(commands, vec![Command::Undo, Command::Redo]);
  }

  #[test]
  fn test_parse_script_reports_line() {
    let script = "{\"type\": \"undo\"}\n{\"type\": \"explode\"}\n";
    match parse_script(script) {
      Err(ConfigError::InvalidCommand { line, .. }) => assert_eq!(line, 2),
      other => panic!("expected InvalidCommand, got {:?}", other),
    }
  }

  #[test]
  fn test_parse_empty_script() {
    assert!(parse_script("").unwrap().is_empty());
  }
}
