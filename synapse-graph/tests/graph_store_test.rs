use std::sync::Arc;

use synapse_core::config::GraphConfig;
use synapse_core::SynapseError;
use synapse_graph::{GraphStore, NeighborSource};
use synapse_storage::StorageEngine;

fn store() -> GraphStore {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    GraphStore::new(storage, GraphConfig::default())
}

#[test]
fn reinforce_is_order_and_case_insensitive() {
    let graph = store();
    graph.reinforce("Sarah", "coffee", 0.1).unwrap();
    graph.reinforce(" coffee ", "SARAH", 0.1).unwrap();
    assert_eq!(graph.link_count().unwrap(), 1);
    let link = graph.link("coffee", "sarah").unwrap().unwrap();
    assert_eq!(link.concept_a, "coffee");
    assert_eq!(link.concept_b, "sarah");
    assert_eq!(link.fire_count, 2);
}

#[test]
fn self_and_empty_pairs_are_no_ops() {
    let graph = store();
    assert_eq!(graph.reinforce("coffee", "Coffee", 0.1).unwrap(), None);
    assert_eq!(graph.reinforce("", "coffee", 0.1).unwrap(), None);
    assert_eq!(graph.record_cooccurrence("a", "a").unwrap(), None);
    assert_eq!(graph.link_count().unwrap(), 0);
    assert_eq!(graph.concept_count().unwrap(), 0);
}

#[test]
fn rate_is_clamped() {
    let graph = store();
    let s = graph.reinforce("a", "b", 7.0).unwrap().unwrap();
    assert!(s < 1.0);
    let t = graph.reinforce("c", "d", -1.0).unwrap().unwrap();
    assert_eq!(t, 0.0);
    assert!(matches!(
        graph.reinforce("a", "b", f64::NAN),
        Err(SynapseError::InvalidInput(_))
    ));
}

#[test]
fn decay_rejects_invalid_factor() {
    let graph = store();
    for factor in [0.0, 1.0, 1.2, -0.5, f64::NAN] {
        assert!(matches!(
            graph.decay(factor, 0.05),
            Err(SynapseError::ConfigError(_))
        ));
    }
}

#[test]
fn decay_default_prunes_weak_links() {
    let graph = store();
    graph.reinforce("a", "b", 0.5).unwrap();
    graph.reinforce("a", "c", 0.051).unwrap();
    let pruned = graph.decay_default().unwrap();
    assert_eq!(pruned, 1);
    let survivor = graph.link("a", "b").unwrap().unwrap();
    assert_eq!(survivor.strength, 0.5 * 0.95);
}

#[test]
fn cooccurrence_score_uses_log_and_cap() {
    let graph = store();
    for _ in 0..3 {
        graph.record_cooccurrence("coffee", "user.preferences").unwrap();
    }
    let keys = vec!["user.preferences".to_string(), "unrelated".to_string()];
    let score = graph.get_cooccurrence_score("coffee", &keys).unwrap();
    let expected = (4.0f64).ln() * 0.03 + (1.0f64).ln() * 0.03;
    assert!((score - expected).abs() < 1e-12);

    for _ in 0..2_000 {
        graph.record_cooccurrence("tea", "user.preferences").unwrap();
    }
    let capped = graph
        .get_cooccurrence_score("tea", &vec!["user.preferences".to_string(); 3])
        .unwrap();
    assert_eq!(capped, 0.3);
    assert!(graph.has_cooccurrence_data().unwrap());
}

#[test]
fn link_concepts_links_every_distinct_pair() {
    let graph = store();
    let concepts: Vec<String> = ["sarah", "likes", "coffee", "Sarah"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(graph.link_concepts(&concepts, 0.1).unwrap(), 3);
    assert_eq!(graph.link_count().unwrap(), 3);
    assert_eq!(graph.cooccurrence_count("coffee", "sarah").unwrap(), 1);
}

#[test]
fn children_of_requires_registered_nodes() {
    let graph = store();
    graph.register_concept("user.preferences.coffee").unwrap();
    graph.register_concept("user.goals").unwrap();
    graph.register_concept("username").unwrap();
    assert_eq!(
        graph.children_of("user").unwrap(),
        vec!["user.goals", "user.preferences.coffee"]
    );
    assert_eq!(
        NeighborSource::children_of(&graph, "user.preferences").unwrap(),
        vec!["user.preferences.coffee"]
    );
}

#[test]
fn snapshot_matches_store() {
    let graph = store();
    graph.reinforce("a", "b", 0.4).unwrap();
    graph.reinforce("b", "c", 0.02).unwrap();
    graph.register_concept("lonely").unwrap();

    let snap = graph.snapshot(0.05).unwrap();
    assert_eq!(snap.node_count(), 4);
    assert_eq!(snap.edge_count(), 1);
    assert_eq!(
        snap.neighbors("a", 0.0).unwrap(),
        graph.neighbors("a", 0.0).unwrap()
    );
}
