//! Aggregate health report generation.

use synapse_core::models::{HealthMetrics, HealthReport, HealthStatus, SubsystemHealth};

use super::subsystem_checks::SubsystemChecker;
use crate::tracing_setup::events;

/// State of one periodic task as seen by the health report.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskHealth {
    pub name: String,
    /// Parked in the terminal error state.
    pub errored: bool,
    pub consecutive_errors: u32,
    pub last_error: Option<String>,
}

/// Subsystem data a health report is built from.
#[derive(Debug, Clone, Default)]
pub struct HealthSnapshot {
    pub storage_ok: bool,
    pub storage_error: Option<String>,
    pub concept_count: usize,
    pub link_count: usize,
    pub pending_facts: usize,
    pub long_term_facts: usize,
    pub embedding_provider: Option<String>,
    pub embedding_available: bool,
    pub embedding_cache_hit_rate: f64,
    pub active_degradations: usize,
    pub tasks: Vec<TaskHealth>,
}

pub struct HealthReporter;

impl HealthReporter {
    pub fn build(snapshot: &HealthSnapshot) -> HealthReport {
        let subsystems = SubsystemChecker::check_all(snapshot);
        let overall_status = Self::derive_overall(&subsystems);
        let unhealthy_or_degraded = subsystems
            .iter()
            .filter(|s| s.status != HealthStatus::Healthy)
            .count();
        events::health_reported(status_name(overall_status), unhealthy_or_degraded);

        HealthReport {
            overall_status,
            subsystems,
            metrics: HealthMetrics {
                concept_count: snapshot.concept_count,
                link_count: snapshot.link_count,
                pending_facts: snapshot.pending_facts,
                long_term_facts: snapshot.long_term_facts,
                embedding_cache_hit_rate: snapshot.embedding_cache_hit_rate,
                degradation_count: snapshot.active_degradations,
            },
        }
    }

    /// Worst subsystem status.
    fn derive_overall(subsystems: &[SubsystemHealth]) -> HealthStatus {
        subsystems
            .iter()
            .map(|s| s.status)
            .max()
            .unwrap_or(HealthStatus::Healthy)
    }
}

fn status_name(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => "healthy",
        HealthStatus::Degraded => "degraded",
        HealthStatus::Unhealthy => "unhealthy",
    }
}
