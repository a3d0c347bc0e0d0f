use async_trait::async_trait;
use trellis_config::{EntityDef, EntityKind};

use crate::error::SourceError;

/// Where the initial actions and triggers of a board come from.
///
/// The two lists are fetched independently; either may fail on its own.
/// Returned entities are unordered, unconnected `{id, name}` pairs.
#[async_trait]
pub trait EntitySource: Send + Sync {
  /// Fetch the available actions.
  async fn fetch_actions(&self) -> Result<Vec<EntityDef>, SourceError>;

  /// Fetch the available triggers.
  async fn fetch_triggers(&self) -> Result<Vec<EntityDef>, SourceError>;

  /// Fetch the list for one entity kind.
  async fn fetch(&self, kind: EntityKind) -> Result<Vec<EntityDef>, SourceError> {
    match kind {
      EntityKind::Action => self.fetch_actions().await,
      EntityKind::Trigger => self.fetch_triggers().await,
    }
  }
}

/// Validate every entity in a fetched list.
pub(crate) fn validate_all(kind: EntityKind, defs: &[EntityDef]) -> Result<(), SourceError> {
  for (index, def) in defs.iter().enumerate() {
    def
      .validate()
      .map_err(|source| SourceError::InvalidEntity {
        kind,
        index,
        source,
      })?;
  }
  Ok(())
}
