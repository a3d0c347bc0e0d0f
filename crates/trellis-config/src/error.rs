use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("entity id must not be empty")]
  EmptyId,

  #[error("entity '{id}' must have a non-empty name")]
  EmptyName { id: String },

  #[error("invalid command on line {line}: {source}")]
  InvalidCommand {
    line: usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid command script: {0}")]
  InvalidScript(#[from] serde_json::Error),
}
