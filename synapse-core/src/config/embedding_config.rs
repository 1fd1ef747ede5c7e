use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// L1 cache capacity (entries).
    pub l1_cache_size: u64,
    /// Provider call timeout in milliseconds. Zero disables the timeout.
    pub timeout_ms: u64,
    /// After a timeout the provider is skipped for this long.
    pub breaker_cooldown_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
            breaker_cooldown_ms: defaults::DEFAULT_EMBEDDING_BREAKER_COOLDOWN_MS,
        }
    }
}
