mod consolidation_error;
mod embedding_error;
mod extraction_error;
mod scheduler_error;
mod storage_error;

pub use consolidation_error::ConsolidationError;
pub use embedding_error::EmbeddingError;
pub use extraction_error::ExtractionError;
pub use scheduler_error::SchedulerError;
pub use storage_error::StorageError;

/// Umbrella error for every Synapse subsystem.
#[derive(Debug, thiserror::Error)]
pub enum SynapseError {
    #[error("fact not found: {key}")]
    FactNotFound { key: String },

    #[error("pending fact not found: {id}")]
    PendingFactNotFound { id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("consolidation error: {0}")]
    ConsolidationError(#[from] ConsolidationError),

    #[error("extraction error: {0}")]
    ExtractionError(#[from] ExtractionError),

    #[error("scheduler error: {0}")]
    SchedulerError(#[from] SchedulerError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("degraded mode: {component} using {fallback}")]
    DegradedMode { component: String, fallback: String },
}

/// Result alias used across the workspace.
pub type SynapseResult<T> = Result<T, SynapseError>;
