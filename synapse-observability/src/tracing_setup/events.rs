//! Structured log events with stable field names.

use tracing::{error, info, warn};

pub fn consolidation_completed(
    processed: usize,
    promoted: usize,
    discarded: usize,
    skipped: usize,
    errors: usize,
) {
    info!(
        event = "consolidation_completed",
        processed, promoted, discarded, skipped, errors
    );
}

pub fn decay_completed(pruned: usize, remaining: usize) {
    info!(event = "decay_completed", pruned, remaining);
}

pub fn extraction_completed(conversations: usize, facts: usize) {
    info!(event = "extraction_completed", conversations, facts);
}

pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    warn!(event = "degradation_triggered", component, failure, fallback);
}

pub fn component_recovered(component: &str) {
    info!(event = "component_recovered", component);
}

pub fn task_failed(task: &str, error: &str, consecutive_errors: u32) {
    error!(event = "task_failed", task, error, consecutive_errors);
}

pub fn health_reported(status: &str, degraded_subsystems: usize) {
    info!(event = "health_reported", status, degraded_subsystems);
}
