//! Span definitions per operation.

/// Create a recall span.
#[macro_export]
macro_rules! recall_span {
    ($query:expr, $limit:expr) => {
        tracing::info_span!("synapse.recall", query = %$query, limit = $limit)
    };
}

/// Create a consolidation span.
#[macro_export]
macro_rules! consolidation_span {
    ($batch_limit:expr) => {
        tracing::info_span!("synapse.consolidation", batch_limit = $batch_limit)
    };
}

/// Create a decay span.
#[macro_export]
macro_rules! decay_span {
    ($factor:expr) => {
        tracing::info_span!("synapse.decay", factor = $factor)
    };
}

/// Create an extraction span.
#[macro_export]
macro_rules! extraction_span {
    ($session_id:expr) => {
        tracing::info_span!("synapse.extraction", session_id = %$session_id)
    };
}

/// Create a span around one run of a scheduled task.
#[macro_export]
macro_rules! task_span {
    ($task:expr) => {
        tracing::info_span!("synapse.task", task = %$task)
    };
}
