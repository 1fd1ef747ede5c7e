use serde::{Deserialize, Serialize};

/// A validated fact produced by the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFact {
    pub key: String,
    pub text: String,
}
