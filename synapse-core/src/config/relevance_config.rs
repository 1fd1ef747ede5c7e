use serde::{Deserialize, Serialize};

use super::defaults;

/// Fixed weights of the hybrid relevance scorer.
///
/// Weights are never renormalized when a signal is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    /// Embedding similarity weight when graph signals are also present.
    pub embedding_weight: f64,
    /// Embedding similarity weight when it is the only non-keyword signal.
    pub embedding_sole_weight: f64,
    pub cooccurrence_weight: f64,
    pub spread_weight: f64,
    /// Keyword overlap weight when other signals are present.
    pub keyword_weight: f64,
    /// Keyword overlap weight when it is the only signal.
    pub keyword_sole_weight: f64,
    /// Number of leading concepts of a fact used for graph signals.
    pub top_concepts: usize,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            embedding_weight: defaults::DEFAULT_EMBEDDING_WEIGHT,
            embedding_sole_weight: defaults::DEFAULT_EMBEDDING_SOLE_WEIGHT,
            cooccurrence_weight: defaults::DEFAULT_COOCCURRENCE_WEIGHT,
            spread_weight: defaults::DEFAULT_SPREAD_WEIGHT,
            keyword_weight: defaults::DEFAULT_KEYWORD_WEIGHT,
            keyword_sole_weight: defaults::DEFAULT_KEYWORD_SOLE_WEIGHT,
            top_concepts: defaults::DEFAULT_TOP_CONCEPTS,
        }
    }
}
