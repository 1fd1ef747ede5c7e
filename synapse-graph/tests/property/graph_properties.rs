//! Property tests: canonical pairs and activation determinism.

use proptest::prelude::*;

use synapse_core::models::canonical_pair;
use synapse_graph::{ConceptGraph, SpreadActivation};

fn edges_strategy() -> impl Strategy<Value = Vec<(u8, u8, f64)>> {
    proptest::collection::vec((0u8..8, 0u8..8, 0.05f64..1.0), 1..24)
}

fn build(edges: &[(u8, u8, f64)]) -> ConceptGraph {
    let mut graph = ConceptGraph::new();
    for (a, b, s) in edges {
        graph.set_link(&format!("n{a}"), &format!("n{b}"), *s);
    }
    graph
}

proptest! {
    #[test]
    fn prop_canonical_pair_is_symmetric(a in "[a-zA-Z ]{0,8}", b in "[a-zA-Z ]{0,8}") {
        let ab = canonical_pair(&a, &b);
        prop_assert_eq!(&ab, &canonical_pair(&b, &a));
        if let Some((x, y)) = ab {
            prop_assert!(x < y);
        }
    }

    #[test]
    fn prop_activation_independent_of_insertion_order(
        edges in edges_strategy(),
        seed in 0u8..8,
    ) {
        // Later duplicates overwrite earlier ones, so dedupe first to make
        // both graphs hold the same strengths.
        let mut unique: Vec<(u8, u8, f64)> = Vec::new();
        for (a, b, s) in edges {
            let key = (a.min(b), a.max(b));
            if a != b && !unique.iter().any(|(x, y, _)| (*x.min(y), *x.max(y)) == key) {
                unique.push((a, b, s));
            }
        }
        let forward = build(&unique);
        let mut reversed_edges = unique.clone();
        reversed_edges.reverse();
        let reversed = build(&reversed_edges);

        let seeds = vec![format!("n{seed}")];
        let a = SpreadActivation::new(&forward, 0.8).activate(&seeds, 0.01, 3, 50).unwrap();
        let b = SpreadActivation::new(&reversed, 0.8).activate(&seeds, 0.01, 3, 50).unwrap();
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(&x.concept, &y.concept);
            prop_assert_eq!(x.activation, y.activation);
        }
    }

    #[test]
    fn prop_activation_bounded_by_seed(edges in edges_strategy(), seed in 0u8..8) {
        let graph = build(&edges);
        let out = SpreadActivation::new(&graph, 0.8)
            .activate(&[format!("n{seed}")], 0.01, 3, 50)
            .unwrap();
        for hit in out {
            prop_assert!(hit.activation > 0.0 && hit.activation <= 1.0);
            prop_assert_ne!(&hit.concept, &format!("n{seed}"));
        }
    }
}
