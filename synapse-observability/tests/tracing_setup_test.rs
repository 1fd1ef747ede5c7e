use synapse_core::config::ObservabilityConfig;
use synapse_core::models::OperationalEvent;
use synapse_core::traits::IEventSink;
use synapse_observability::{init_tracing, TracingSink};

#[test]
fn subscriber_installs_once() {
    let config = ObservabilityConfig {
        json_logs: true,
        ..ObservabilityConfig::default()
    };
    assert!(init_tracing(&config));
    assert!(!init_tracing(&config));

    let event = OperationalEvent::new("decay_completed", serde_json::json!({ "pruned": 2 }));
    assert!(TracingSink.emit(&event).is_ok());
}

#[test]
fn task_span_is_named_and_tagged() {
    tracing::subscriber::with_default(tracing_subscriber::registry(), || {
        let span = synapse_observability::task_span!("consolidation");
        let metadata = span.metadata().expect("span enabled under registry");
        assert_eq!(metadata.name(), "synapse.task");
        assert!(metadata.fields().field("task").is_some());
    });
}
