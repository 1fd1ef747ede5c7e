use serde::{Deserialize, Serialize};

use super::defaults;

/// Concept graph configuration: reinforcement, decay, and spread activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Hebbian learning rate applied on every co-occurrence.
    pub learning_rate: f64,
    /// Multiplicative decay factor applied per decay run (0 < f < 1).
    pub decay_factor: f64,
    /// Links weaker than this after decay are pruned.
    pub min_strength: f64,
    /// Maximum concepts extracted from one fact text.
    pub max_concepts_per_fact: usize,
    /// Minimum activation kept during spreading.
    pub activation_threshold: f64,
    /// Maximum number of hops explored from the seeds.
    pub max_hops: usize,
    /// Maximum activated concepts returned.
    pub activation_limit: usize,
    /// Activation floor granted to `seed.*` children.
    pub hierarchical_boost: f64,
    /// Upper bound of the co-occurrence score.
    pub cooccurrence_cap: f64,
    /// Per-pair multiplier of `ln(count + 1)` in the co-occurrence score.
    pub cooccurrence_scale: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            decay_factor: defaults::DEFAULT_DECAY_FACTOR,
            min_strength: defaults::DEFAULT_MIN_LINK_STRENGTH,
            max_concepts_per_fact: defaults::DEFAULT_MAX_CONCEPTS_PER_FACT,
            activation_threshold: defaults::DEFAULT_ACTIVATION_THRESHOLD,
            max_hops: defaults::DEFAULT_MAX_HOPS,
            activation_limit: defaults::DEFAULT_ACTIVATION_LIMIT,
            hierarchical_boost: defaults::DEFAULT_HIERARCHICAL_BOOST,
            cooccurrence_cap: defaults::DEFAULT_COOCCURRENCE_CAP,
            cooccurrence_scale: defaults::DEFAULT_COOCCURRENCE_SCALE,
        }
    }
}
