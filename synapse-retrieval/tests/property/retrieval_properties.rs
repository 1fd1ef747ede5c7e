use std::sync::Arc;

use proptest::prelude::*;
use synapse_core::config::{GraphConfig, RelevanceConfig};
use synapse_embeddings::EmbeddingEngine;
use synapse_graph::GraphStore;
use synapse_retrieval::RelevanceScorer;
use synapse_storage::StorageEngine;

fn keyword_scorer() -> RelevanceScorer {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    RelevanceScorer::new(
        Arc::new(GraphStore::new(storage, GraphConfig::default())),
        Arc::new(EmbeddingEngine::disabled()),
        RelevanceConfig::default(),
        GraphConfig::default(),
    )
}

proptest! {
    #[test]
    fn output_is_sorted_permutation(
        query in "[a-z ]{0,30}",
        candidates in proptest::collection::vec("[a-z ]{0,40}", 0..12),
    ) {
        let scorer = keyword_scorer();
        let ranked = scorer.score(&query, &candidates, &[]);

        prop_assert_eq!(ranked.len(), candidates.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for scored in &ranked {
            prop_assert!((0.0..=1.0).contains(&scored.score));
        }
        let mut seen: Vec<String> = ranked.into_iter().map(|s| s.fact).collect();
        let mut expected = candidates.clone();
        seen.sort();
        expected.sort();
        prop_assert_eq!(seen, expected);
    }
}
