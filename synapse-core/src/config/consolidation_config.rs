use serde::{Deserialize, Serialize};

use super::defaults;

/// Consolidation subsystem configuration.
///
/// Thresholds live in the 1–5 total-score space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Totals at or above this promote to L2 (mirrored into L3).
    pub l2_threshold: f64,
    /// Totals at or above this (and below `l2_threshold`) promote to L3.
    pub l3_threshold: f64,
    /// Totals at or below this are discarded.
    pub discard_threshold: f64,
    /// Upper bound on pending facts processed per run.
    pub max_facts_per_run: usize,
    /// Maximum content tokens in a generated hierarchical key.
    pub max_key_tokens: usize,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            l2_threshold: defaults::DEFAULT_L2_THRESHOLD,
            l3_threshold: defaults::DEFAULT_L3_THRESHOLD,
            discard_threshold: defaults::DEFAULT_DISCARD_THRESHOLD,
            max_facts_per_run: defaults::DEFAULT_MAX_FACTS_PER_RUN,
            max_key_tokens: defaults::DEFAULT_MAX_KEY_TOKENS,
        }
    }
}
