use std::time::Duration;

use async_trait::async_trait;
use trellis_config::{EntityDef, EntityKind};

use crate::error::SourceError;
use crate::source::{EntitySource, validate_all};

/// In-memory entity source with optional simulated latency.
///
/// Useful for demos and tests. Either list can be made to fail so callers can
/// exercise their failure handling.
#[derive(Debug, Clone, Default)]
pub struct StaticEntitySource {
  actions: Vec<EntityDef>,
  triggers: Vec<EntityDef>,
  latency: Duration,
  failing_actions: Option<String>,
  failing_triggers: Option<String>,
}

impl StaticEntitySource {
  pub fn new(actions: Vec<EntityDef>, triggers: Vec<EntityDef>) -> Self {
    Self {
      actions,
      triggers,
      ..Self::default()
    }
  }

  /// The demo data set: four actions and four triggers.
  pub fn sample() -> Self {
    Self::new(
      vec![
        EntityDef::new("doSomething", "do something"),
        EntityDef::new("doSomethingElse", "do something else"),
        EntityDef::new("doSomethingSlowly", "do something slowly"),
        EntityDef::new("doSomethingWithAlacrity", "do something with alacrity"),
      ],
      vec![
        EntityDef::new("onSomething", "on something"),
        EntityDef::new("onSomethingElse", "on something else"),
        EntityDef::new("onSomethingFast", "on something fast"),
        EntityDef::new("onSomethingVerySad", "on something very sad"),
      ],
    )
  }

  /// Delay every fetch by `latency`.
  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }

  /// Make fetches of one kind fail with the given message.
  pub fn failing(mut self, kind: EntityKind, message: impl Into<String>) -> Self {
    match kind {
      EntityKind::Action => self.failing_actions = Some(message.into()),
      EntityKind::Trigger => self.failing_triggers = Some(message.into()),
    }
    self
  }

  async fn serve(
    &self,
    kind: EntityKind,
    defs: &[EntityDef],
    failure: Option<&String>,
  ) -> Result<Vec<EntityDef>, SourceError> {
    if !self.latency.is_zero() {
      tokio::time::sleep(self.latency).await;
    }
    if let Some(message) = failure {
      return Err(SourceError::Unavailable {
        kind,
        message: message.clone(),
      });
    }
    validate_all(kind, defs)?;
    Ok(defs.to_vec())
  }
}

#[async_trait]
impl EntitySource for StaticEntitySource {
  async fn fetch_actions(&self) -> Result<Vec<EntityDef>, SourceError> {
    self
      .serve(
        EntityKind::Action,
        &self.actions,
        self.failing_actions.as_ref(),
      )
      .await
  }

  async fn fetch_triggers(&self) -> Result<Vec<EntityDef>, SourceError> {
    self
      .serve(
        EntityKind::Trigger,
        &self.triggers,
        self.failing_triggers.as_ref(),
      )
      .await
  }
}
