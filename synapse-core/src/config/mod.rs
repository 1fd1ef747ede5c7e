//! Configuration for every Synapse subsystem.
//!
//! All sections use `#[serde(default)]`, so a TOML file only needs the keys
//! it overrides.
//!
//! # Examples
//!
//! ```
//! use synapse_core::config::SynapseConfig;
//!
//! let config = SynapseConfig::from_toml("[graph]\nlearning_rate = 0.2\n").unwrap();
//! assert!((config.graph.learning_rate - 0.2).abs() < f64::EPSILON);
//! assert_eq!(config.consolidation.max_facts_per_run, 50);
//! ```

pub mod consolidation_config;
pub mod defaults;
pub mod embedding_config;
pub mod extraction_config;
pub mod graph_config;
pub mod observability_config;
pub mod relevance_config;
pub mod scheduler_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use consolidation_config::ConsolidationConfig;
pub use embedding_config::EmbeddingConfig;
pub use extraction_config::ExtractionConfig;
pub use graph_config::GraphConfig;
pub use observability_config::ObservabilityConfig;
pub use relevance_config::RelevanceConfig;
pub use scheduler_config::{SchedulerConfig, TaskConfig};
pub use storage_config::StorageConfig;

use crate::errors::{SynapseError, SynapseResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SynapseConfig {
    pub storage: StorageConfig,
    pub graph: GraphConfig,
    pub relevance: RelevanceConfig,
    pub embedding: EmbeddingConfig,
    pub consolidation: ConsolidationConfig,
    pub extraction: ExtractionConfig,
    pub scheduler: SchedulerConfig,
    pub observability: ObservabilityConfig,
}

impl SynapseConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> SynapseResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SynapseError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> SynapseResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| SynapseError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&source)
    }

    /// Serialize to a TOML document.
    pub fn to_toml(&self) -> SynapseResult<String> {
        toml::to_string_pretty(self).map_err(|e| SynapseError::ConfigError(e.to_string()))
    }

    /// Reject values that would break the engine's invariants.
    pub fn validate(&self) -> SynapseResult<()> {
        let g = &self.graph;
        check_unit("graph.learning_rate", g.learning_rate)?;
        if !(g.decay_factor > 0.0 && g.decay_factor < 1.0) {
            return Err(SynapseError::ConfigError(format!(
                "graph.decay_factor must be in (0, 1), got {}",
                g.decay_factor
            )));
        }
        check_unit("graph.min_strength", g.min_strength)?;
        check_unit("graph.activation_threshold", g.activation_threshold)?;
        check_unit("graph.hierarchical_boost", g.hierarchical_boost)?;

        let c = &self.consolidation;
        if !(c.discard_threshold < c.l3_threshold && c.l3_threshold <= c.l2_threshold) {
            return Err(SynapseError::ConfigError(format!(
                "consolidation thresholds must satisfy discard < l3 <= l2, got {} / {} / {}",
                c.discard_threshold, c.l3_threshold, c.l2_threshold
            )));
        }
        if c.max_facts_per_run == 0 {
            return Err(SynapseError::ConfigError(
                "consolidation.max_facts_per_run must be positive".into(),
            ));
        }

        let e = &self.extraction;
        if e.max_attempts == 0 || e.min_fact_chars > e.max_fact_chars {
            return Err(SynapseError::ConfigError(format!(
                "extraction limits invalid: attempts {}, chars {}..{}",
                e.max_attempts, e.min_fact_chars, e.max_fact_chars
            )));
        }

        let s = &self.scheduler;
        for (name, task) in [
            ("consolidation", &s.consolidation),
            ("decay", &s.decay),
            ("memory_extraction", &s.memory_extraction),
            ("health", &s.health),
        ] {
            if task.interval_secs == 0 || task.backoff_multiplier < 1.0 {
                return Err(SynapseError::ConfigError(format!(
                    "scheduler.{name}: interval must be positive and backoff >= 1.0"
                )));
            }
        }
        Ok(())
    }
}

fn check_unit(name: &str, value: f64) -> SynapseResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SynapseError::ConfigError(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}
