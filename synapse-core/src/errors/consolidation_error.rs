/// Consolidation subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum ConsolidationError {
    #[error("consolidation already in progress")]
    AlreadyRunning,

    #[error("scoring failed: {reason}")]
    ScoringFailed { reason: String },

    #[error("promotion of {key} failed: {reason}")]
    PromotionFailed { key: String, reason: String },
}
