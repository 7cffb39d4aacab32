//! Pipeline Stage Ownership
//!
//! A [`HashStage`] is the single owner of a hash unit configuration.
//! Reconfiguration builds the complete new configuration first and then
//! swaps one `Arc` under a write lock; evaluations clone the `Arc` under a
//! read lock and run without holding it. An in-flight evaluation therefore
//! sees either the old configuration or the new one, never a mix.

use crate::config::{HashUnitConfig, HashUnitConfigBuilder};
use crate::engine::parallel;
use crate::evaluate::{evaluate, Evaluation};
use crate::phv::PacketHeaderView;
use crate::types::ConfigError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Immutable configuration captured by one evaluation.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    version: u64,
    config: Arc<HashUnitConfig>,
}

impl ConfigSnapshot {
    /// Version assigned when the configuration was installed (starts at 1).
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &HashUnitConfig {
        &self.config
    }

    /// Evaluate one packet against this snapshot.
    #[must_use]
    pub fn evaluate<P: PacketHeaderView + ?Sized>(&self, phv: &P) -> Evaluation {
        evaluate(&self.config, phv)
    }
}

// =============================================================================
// STAGE
// =============================================================================

/// Owner of one hash unit's configuration.
#[derive(Debug, Default)]
pub struct HashStage {
    current: RwLock<Option<ConfigSnapshot>>,
    generation: AtomicU64,
}

impl HashStage {
    /// Unconfigured stage.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Install a validated configuration, returning its version.
    pub fn configure(&self, config: HashUnitConfig) -> u64 {
        let config = Arc::new(config);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let version = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        *current = Some(ConfigSnapshot { version, config });
        tracing::debug!(version, "hash stage reconfigured");
        version
    }

    /// Build and install in one step.
    ///
    /// # Errors
    /// The build error; the previously installed configuration stays active.
    pub fn configure_from(&self, builder: &HashUnitConfigBuilder) -> Result<u64, ConfigError> {
        match builder.build() {
            Ok(config) => Ok(self.configure(config)),
            Err(err) => {
                tracing::warn!(error = %err, "hash stage configuration rejected");
                Err(err)
            }
        }
    }

    /// Drop the current configuration.
    pub fn reset(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Current configuration, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<ConfigSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Version of the current configuration, 0 when unconfigured.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.snapshot().map_or(0, |s| s.version)
    }

    /// Evaluate one packet; `None` when the stage is unconfigured.
    #[must_use]
    pub fn evaluate<P: PacketHeaderView + ?Sized>(&self, phv: &P) -> Option<Evaluation> {
        self.snapshot().map(|s| s.evaluate(phv))
    }

    /// Evaluate a batch against one snapshot; `None` when unconfigured.
    #[must_use]
    pub fn evaluate_batch<P>(&self, phvs: &[P]) -> Option<Vec<Evaluation>>
    where
        P: PacketHeaderView + Sync,
    {
        self.snapshot()
            .map(|s| parallel::evaluate_batch(s.config(), phvs))
    }
}
