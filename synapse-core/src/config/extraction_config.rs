use serde::{Deserialize, Serialize};

use super::defaults;

/// Fact extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Extractor calls per conversation before giving up on malformed output.
    pub max_attempts: u32,
    pub min_fact_chars: usize,
    pub max_fact_chars: usize,
    /// Facts kept from one extraction; the rest are dropped.
    pub max_facts_per_extraction: usize,
    /// Conversations queued for extraction before new ones are rejected.
    pub inbox_capacity: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::DEFAULT_EXTRACTION_MAX_ATTEMPTS,
            min_fact_chars: defaults::DEFAULT_MIN_FACT_CHARS,
            max_fact_chars: defaults::DEFAULT_MAX_FACT_CHARS,
            max_facts_per_extraction: defaults::DEFAULT_MAX_FACTS_PER_EXTRACTION,
            inbox_capacity: defaults::DEFAULT_INBOX_CAPACITY,
        }
    }
}
