use synapse_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = SynapseConfig::from_toml("").unwrap();

    assert_eq!(config.storage.db_path, "synapse.db");
    assert_eq!(config.storage.read_pool_size, 4);

    assert_eq!(config.graph.learning_rate, 0.1);
    assert_eq!(config.graph.decay_factor, 0.95);
    assert_eq!(config.graph.max_hops, 2);
    assert_eq!(config.graph.hierarchical_boost, 0.8);

    assert_eq!(config.relevance.embedding_weight, 0.5);
    assert_eq!(config.relevance.embedding_sole_weight, 0.7);
    assert_eq!(config.relevance.keyword_sole_weight, 1.0);

    assert_eq!(config.consolidation.l2_threshold, 4.0);
    assert_eq!(config.consolidation.l3_threshold, 3.0);
    assert_eq!(config.consolidation.discard_threshold, 2.0);

    assert_eq!(config.extraction.max_attempts, 3);
    assert_eq!(config.scheduler.consolidation.interval_secs, 3_600);
    assert_eq!(config.scheduler.decay.interval_secs, 86_400);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[graph]
learning_rate = 0.25

[scheduler.decay]
interval_secs = 10
enabled = false
"#;
    let config = SynapseConfig::from_toml(toml).unwrap();
    assert_eq!(config.graph.learning_rate, 0.25);
    // Non-overridden fields keep defaults
    assert_eq!(config.graph.min_strength, 0.05);
    assert_eq!(config.scheduler.decay.interval_secs, 10);
    assert!(!config.scheduler.decay.enabled);
    assert_eq!(config.scheduler.decay.backoff_multiplier, 2.0);
}

#[test]
fn config_rejects_decay_factor_out_of_range() {
    for bad in ["0.0", "1.0", "1.5"] {
        let toml = format!("[graph]\ndecay_factor = {bad}\n");
        assert!(SynapseConfig::from_toml(&toml).is_err(), "factor {bad}");
    }
}

#[test]
fn config_rejects_inverted_thresholds() {
    let toml = "[consolidation]\nl3_threshold = 4.5\n";
    assert!(SynapseConfig::from_toml(toml).is_err());
    let toml = "[consolidation]\ndiscard_threshold = 3.0\n";
    assert!(SynapseConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_zero_interval() {
    let toml = "[scheduler.health]\ninterval_secs = 0\n";
    assert!(SynapseConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_malformed_toml() {
    assert!(SynapseConfig::from_toml("[graph\nlearning_rate = ").is_err());
}

#[test]
fn config_survives_toml_round_trip() {
    let mut config = SynapseConfig::default();
    config.relevance.top_concepts = 9;
    let text = config.to_toml().unwrap();
    let back = SynapseConfig::from_toml(&text).unwrap();
    assert_eq!(back.relevance.top_concepts, 9);
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synapse.toml");
    std::fs::write(&path, "[storage]\nread_pool_size = 2\n").unwrap();
    let config = SynapseConfig::load(&path).unwrap();
    assert_eq!(config.storage.read_pool_size, 2);

    assert!(SynapseConfig::load(&dir.path().join("missing.toml")).is_err());
}
