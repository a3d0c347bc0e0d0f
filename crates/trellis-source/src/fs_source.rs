use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use trellis_config::{EntityDef, EntityKind};

use crate::error::SourceError;
use crate::source::{EntitySource, validate_all};

/// Filesystem-based entity source.
///
/// Entities are stored as JSON arrays of `{"id", "name"}` objects:
/// ```text
/// {root}/
/// ├── actions.json
/// └── triggers.json
/// ```
pub struct FsEntitySource {
  root: PathBuf,
}

impl FsEntitySource {
  /// Create a new filesystem source rooted at the given directory.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Get the root directory of the source.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Path of the file holding one entity kind.
  pub fn file_path(&self, kind: EntityKind) -> PathBuf {
    match kind {
      EntityKind::Action => self.root.join("actions.json"),
      EntityKind::Trigger => self.root.join("triggers.json"),
    }
  }

  async fn read_entities(&self, kind: EntityKind) -> Result<Vec<EntityDef>, SourceError> {
    let path = self.file_path(kind);
    let content = fs::read_to_string(&path)
      .await
      .map_err(|source| SourceError::Io {
        path: path.clone(),
        source,
      })?;
    let defs: Vec<EntityDef> =
      serde_json::from_str(&content).map_err(|source| SourceError::Parse {
        path: path.clone(),
        source,
      })?;
    validate_all(kind, &defs)?;

    debug!(path = %path.display(), count = defs.len(), %kind, "read entities");
    Ok(defs)
  }
}

#[async_trait]
impl EntitySource for FsEntitySource {
  async fn fetch_actions(&self) -> Result<Vec<EntityDef>, SourceError> {
    self.read_entities(EntityKind::Action).await
  }

  async fn fetch_triggers(&self) -> Result<Vec<EntityDef>, SourceError> {
    self.read_entities(EntityKind::Trigger).await
  }
}
