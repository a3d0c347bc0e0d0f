use std::path::PathBuf;

use thiserror::Error;
use trellis_config::{ConfigError, EntityKind};

#[derive(Debug, Error)]
pub enum SourceError {
  #[error("failed to read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid {kind} at index {index}: {source}")]
  InvalidEntity {
    kind: EntityKind,
    index: usize,
    #[source]
    source: ConfigError,
  },

  #[error("{kind} source unavailable: {message}")]
  Unavailable { kind: EntityKind, message: String },
}
