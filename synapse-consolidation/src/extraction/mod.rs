//! Extraction pipeline: extractor call, defensive parse, validation, and
//! corrective retries on malformed output.

pub mod parse;
pub mod validate;

use std::sync::Arc;

use synapse_core::config::ExtractionConfig;
use synapse_core::models::ExtractedFact;
use synapse_core::traits::IFactExtractor;
use tracing::{debug, warn};

pub use parse::{parse_facts, RawFact};
pub use validate::{is_acknowledgement, normalize_key, validate};

/// Sent with the next attempt after malformed output.
pub const CORRECTION_PROMPT: &str = "The previous reply could not be parsed. \
     Reply with only a JSON array of objects with \"key\" and \"text\" string fields.";

pub struct ExtractionPipeline {
    extractor: Arc<dyn IFactExtractor>,
    config: ExtractionConfig,
}

impl ExtractionPipeline {
    pub fn new(extractor: Arc<dyn IFactExtractor>, config: ExtractionConfig) -> Self {
        Self { extractor, config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Validated facts for one conversation. Gives up with no facts after
    /// `max_attempts` failed or malformed extractor replies.
    pub fn extract(&self, conversation: &str) -> Vec<ExtractedFact> {
        let mut correction: Option<&str> = None;
        for attempt in 1..=self.config.max_attempts {
            let raw = match self.extractor.extract(conversation, correction) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(attempt, error = %e, "extractor call failed");
                    continue;
                }
            };
            match parse_facts(&raw) {
                Ok(parsed) => {
                    let parsed_count = parsed.len();
                    let facts = validate(parsed, &self.config);
                    debug!(attempt, parsed = parsed_count, kept = facts.len(), "facts extracted");
                    return facts;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "malformed extractor output");
                    correction = Some(CORRECTION_PROMPT);
                }
            }
        }
        warn!(
            attempts = self.config.max_attempts,
            "extraction gave up, treating conversation as having no facts"
        );
        Vec::new()
    }
}
