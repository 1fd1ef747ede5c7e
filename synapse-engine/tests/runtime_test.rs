use std::sync::Arc;

use synapse_core::models::{FactScore, HealthStatus};
use synapse_engine::{Engine, Runtime};
use synapse_scheduler::{TaskKind, TaskStatus};
use test_fixtures::{HashEmbedder, ScriptedExtractor, ScriptedScorer};

fn runtime() -> Runtime {
    let engine = Engine::builder()
        .embedder(Arc::new(HashEmbedder::default()))
        .scorer(Arc::new(ScriptedScorer::new(FactScore::new(4.0, 4.0, 4.0))))
        .extractor(Arc::new(ScriptedExtractor::new([
            r#"[{"key": "user.personal.city", "text": "User lives in Lisbon near the river"}]"#,
        ])))
        .build()
        .unwrap();
    Runtime::new(engine)
}

#[tokio::test]
async fn task_table_registers_every_kind() {
    let runtime = runtime();
    let kinds: Vec<TaskKind> = runtime
        .scheduler()
        .statuses()
        .into_iter()
        .map(|s| s.kind)
        .collect();
    assert_eq!(kinds, TaskKind::ALL.to_vec());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn manual_runs_drive_extraction_then_consolidation() {
    let runtime = runtime();
    runtime
        .engine()
        .submit_conversation("s1", "I moved to Lisbon last year")
        .unwrap();

    let extraction = runtime.run_now(TaskKind::MemoryExtraction).await.unwrap();
    assert_eq!(extraction.run_count, 1);
    assert_eq!(extraction.consecutive_errors, 0);

    let consolidation = runtime.run_now(TaskKind::Consolidation).await.unwrap();
    assert_eq!(consolidation.error_count, 0);
    let fact = runtime
        .engine()
        .facts()
        .get_required("user.personal.city")
        .unwrap();
    assert_eq!(fact.l3_value, vec!["User lives in Lisbon near the river"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_task_sees_task_states() {
    let runtime = runtime();
    runtime.run_now(TaskKind::Decay).await.unwrap();
    runtime.run_now(TaskKind::Health).await.unwrap();

    let cached = runtime.engine().latest_health().unwrap();
    let scheduler = cached
        .subsystems
        .iter()
        .find(|s| s.name == "scheduler")
        .unwrap();
    assert_eq!(scheduler.status, HealthStatus::Healthy);
    assert_eq!(runtime.health().overall_status, HealthStatus::Healthy);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_stops_workers() {
    let runtime = runtime();
    runtime.start().unwrap();
    runtime.shutdown().await;

    assert!(runtime.scheduler().is_shut_down());
    assert!(runtime
        .scheduler()
        .statuses()
        .iter()
        .all(|s| s.status == TaskStatus::Stopped));
    assert!(runtime.run_now(TaskKind::Decay).await.is_err());
}
