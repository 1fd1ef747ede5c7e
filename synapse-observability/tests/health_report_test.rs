use synapse_core::models::HealthStatus;
use synapse_observability::{HealthReporter, HealthSnapshot, TaskHealth};

fn healthy() -> HealthSnapshot {
    HealthSnapshot {
        storage_ok: true,
        concept_count: 10,
        link_count: 12,
        pending_facts: 3,
        long_term_facts: 5,
        embedding_provider: Some("hash".into()),
        embedding_available: true,
        embedding_cache_hit_rate: 0.8,
        tasks: vec![TaskHealth {
            name: "decay".into(),
            errored: false,
            consecutive_errors: 0,
            last_error: None,
        }],
        ..HealthSnapshot::default()
    }
}

fn status_of(report: &synapse_core::models::HealthReport, name: &str) -> HealthStatus {
    report
        .subsystems
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.status)
        .unwrap_or_else(|| panic!("missing subsystem {name}"))
}

#[test]
fn all_green() {
    let report = HealthReporter::build(&healthy());
    assert_eq!(report.overall_status, HealthStatus::Healthy);
    assert_eq!(report.metrics.long_term_facts, 5);
    assert_eq!(report.subsystems.len(), 4);
}

#[test]
fn missing_provider_is_only_degraded() {
    let report = HealthReporter::build(&HealthSnapshot {
        embedding_provider: None,
        embedding_available: false,
        ..healthy()
    });
    assert_eq!(status_of(&report, "embeddings"), HealthStatus::Degraded);
    assert_eq!(report.overall_status, HealthStatus::Degraded);
}

#[test]
fn errored_task_makes_report_unhealthy() {
    let mut snapshot = healthy();
    snapshot.tasks.push(TaskHealth {
        name: "consolidation".into(),
        errored: true,
        consecutive_errors: 5,
        last_error: Some("storage locked".into()),
    });
    let report = HealthReporter::build(&snapshot);
    assert_eq!(status_of(&report, "scheduler"), HealthStatus::Unhealthy);
    assert_eq!(report.overall_status, HealthStatus::Unhealthy);
}

#[test]
fn backing_off_task_is_degraded() {
    let mut snapshot = healthy();
    snapshot.tasks[0].consecutive_errors = 1;
    let report = HealthReporter::build(&snapshot);
    assert_eq!(status_of(&report, "scheduler"), HealthStatus::Degraded);
}

#[test]
fn storage_failure_is_unhealthy() {
    let report = HealthReporter::build(&HealthSnapshot {
        storage_ok: false,
        storage_error: Some("disk I/O error".into()),
        ..healthy()
    });
    let storage = report.subsystems.iter().find(|s| s.name == "storage").unwrap();
    assert_eq!(storage.status, HealthStatus::Unhealthy);
    assert_eq!(storage.message.as_deref(), Some("disk I/O error"));
}
