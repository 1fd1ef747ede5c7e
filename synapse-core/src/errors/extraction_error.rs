/// Fact extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extractor unavailable: {reason}")]
    ExtractorUnavailable { reason: String },

    #[error("malformed extractor output: {reason}")]
    MalformedOutput { reason: String },

    #[error("extraction inbox full: capacity {capacity}")]
    InboxFull { capacity: usize },
}
