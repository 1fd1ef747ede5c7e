//! Per-subsystem checks: storage, graph, embeddings, scheduler.

use synapse_core::models::{HealthStatus, SubsystemHealth};

use super::reporter::HealthSnapshot;

pub struct SubsystemChecker;

impl SubsystemChecker {
    pub fn check_all(snapshot: &HealthSnapshot) -> Vec<SubsystemHealth> {
        vec![
            Self::check_storage(snapshot),
            Self::check_graph(snapshot),
            Self::check_embeddings(snapshot),
            Self::check_scheduler(snapshot),
        ]
    }

    /// Storage: unhealthy when the counters could not be read.
    fn check_storage(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.storage_ok {
            (HealthStatus::Healthy, None)
        } else {
            (
                HealthStatus::Unhealthy,
                Some(
                    snapshot
                        .storage_error
                        .clone()
                        .unwrap_or_else(|| "storage unreachable".into()),
                ),
            )
        };
        subsystem("storage", status, message)
    }

    /// Graph: degraded when concepts exist but no link survived decay.
    fn check_graph(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.concept_count > 1 && snapshot.link_count == 0 {
            (
                HealthStatus::Degraded,
                Some(format!(
                    "{} concepts but no links; spread activation has nothing to walk",
                    snapshot.concept_count
                )),
            )
        } else {
            (HealthStatus::Healthy, None)
        };
        subsystem("graph", status, message)
    }

    /// Embeddings: degraded without a usable provider or with active
    /// degradations. Running without a provider is a supported mode.
    fn check_embeddings(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = match (&snapshot.embedding_provider, snapshot.embedding_available) {
            (None, _) => (
                HealthStatus::Degraded,
                Some("no embedding provider; relevance uses graph and keywords".into()),
            ),
            (Some(name), false) => (
                HealthStatus::Degraded,
                Some(format!("embedding provider {name} unavailable")),
            ),
            (Some(_), true) if snapshot.active_degradations > 0 => (
                HealthStatus::Degraded,
                Some(format!(
                    "{} active degradation events",
                    snapshot.active_degradations
                )),
            ),
            (Some(_), true) => (HealthStatus::Healthy, None),
        };
        subsystem("embeddings", status, message)
    }

    /// Scheduler: unhealthy if any task is parked in error, degraded while
    /// any task is backing off.
    fn check_scheduler(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let errored: Vec<&str> = snapshot
            .tasks
            .iter()
            .filter(|t| t.errored)
            .map(|t| t.name.as_str())
            .collect();
        let backing_off: Vec<&str> = snapshot
            .tasks
            .iter()
            .filter(|t| !t.errored && t.consecutive_errors > 0)
            .map(|t| t.name.as_str())
            .collect();

        let (status, message) = if !errored.is_empty() {
            (
                HealthStatus::Unhealthy,
                Some(format!("tasks in error: {}", errored.join(", "))),
            )
        } else if !backing_off.is_empty() {
            (
                HealthStatus::Degraded,
                Some(format!("tasks backing off: {}", backing_off.join(", "))),
            )
        } else {
            (HealthStatus::Healthy, None)
        };
        subsystem("scheduler", status, message)
    }
}

fn subsystem(name: &str, status: HealthStatus, message: Option<String>) -> SubsystemHealth {
    SubsystemHealth {
        name: name.into(),
        status,
        message,
    }
}
