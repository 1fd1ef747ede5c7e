use synapse_core::constants::MAX_LINK_STRENGTH;
use synapse_core::traits::IGraphStorage;
use synapse_storage::StorageEngine;

#[test]
fn reinforce_inserts_at_rate_then_applies_hebbian_update() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let first = engine
        .reinforce_link("coffee", "sarah", 0.1, MAX_LINK_STRENGTH)
        .unwrap();
    assert!((first - 0.1).abs() < 1e-12);

    let second = engine
        .reinforce_link("coffee", "sarah", 0.1, MAX_LINK_STRENGTH)
        .unwrap();
    assert!((second - 0.19).abs() < 1e-12);

    let link = engine.get_link("coffee", "sarah").unwrap().unwrap();
    assert_eq!(link.fire_count, 2);
    assert!((link.strength - second).abs() < 1e-12);
}

#[test]
fn reinforce_registers_both_nodes() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .reinforce_link("cafe", "sarah", 0.1, MAX_LINK_STRENGTH)
        .unwrap();
    engine
        .reinforce_link("coffee", "sarah", 0.1, MAX_LINK_STRENGTH)
        .unwrap();
    assert_eq!(engine.concept_count().unwrap(), 3);
    let sarah = engine.get_concept("sarah").unwrap().unwrap();
    assert_eq!(sarah.mention_count, 2);
}

#[test]
fn strength_is_capped_below_one() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut strength = 0.0;
    for _ in 0..200 {
        strength = engine
            .reinforce_link("a", "b", 0.9, MAX_LINK_STRENGTH)
            .unwrap();
    }
    assert!(strength < 1.0);
    assert!(strength <= MAX_LINK_STRENGTH);
}

#[test]
fn decay_scales_and_prunes() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.reinforce_link("a", "b", 0.5, MAX_LINK_STRENGTH).unwrap();
    engine.reinforce_link("a", "c", 0.06, MAX_LINK_STRENGTH).unwrap();

    let pruned = engine.decay_links(0.5, 0.05).unwrap();
    assert_eq!(pruned, 1);
    assert_eq!(engine.link_count().unwrap(), 1);
    let survivor = engine.get_link("a", "b").unwrap().unwrap();
    assert_eq!(survivor.strength, 0.5 * 0.5);
    assert!(engine.get_link("a", "c").unwrap().is_none());
}

#[test]
fn links_of_returns_both_sides_ordered() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.reinforce_link("alpha", "mid", 0.3, MAX_LINK_STRENGTH).unwrap();
    engine.reinforce_link("mid", "zeta", 0.6, MAX_LINK_STRENGTH).unwrap();
    engine.reinforce_link("beta", "mid", 0.3, MAX_LINK_STRENGTH).unwrap();
    engine.reinforce_link("mid", "weak", 0.01, MAX_LINK_STRENGTH).unwrap();

    let neighbors = engine.links_of("mid", 0.05, 10).unwrap();
    let names: Vec<&str> = neighbors.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "beta"]);

    let limited = engine.links_of("mid", 0.0, 2).unwrap();
    assert_eq!(limited.len(), 2);
}

#[test]
fn concepts_with_prefix_matches_literally() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for name in ["user.preferences", "user.preferences.coffee", "user_x", "users"] {
        engine.upsert_concept(name).unwrap();
    }
    let children = engine.concepts_with_prefix("user.").unwrap();
    assert_eq!(children, vec!["user.preferences", "user.preferences.coffee"]);
}

#[test]
fn cooccurrence_counts_accumulate() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert_eq!(engine.cooccurrence_count("a", "b").unwrap(), 0);
    assert_eq!(engine.increment_cooccurrence("a", "b").unwrap(), 1);
    assert_eq!(engine.increment_cooccurrence("a", "b").unwrap(), 2);
    assert_eq!(engine.cooccurrence_count("a", "b").unwrap(), 2);
    assert_eq!(engine.cooccurrence_pair_count().unwrap(), 1);
}
