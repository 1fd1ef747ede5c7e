//! Property tests: canonical storage, Hebbian monotonicity, decay.

use proptest::prelude::*;

use synapse_core::constants::MAX_LINK_STRENGTH;
use synapse_core::traits::IGraphStorage;
use synapse_storage::StorageEngine;

proptest! {
    #[test]
    fn prop_reinforce_strictly_increases_below_one(rate in 0.01f64..0.99, rounds in 1usize..40) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let mut previous = 0.0;
        for _ in 0..rounds {
            let next = engine.reinforce_link("a", "b", rate, MAX_LINK_STRENGTH).unwrap();
            prop_assert!(next < 1.0);
            prop_assert!(next > previous || next == MAX_LINK_STRENGTH);
            previous = next;
        }
    }

    #[test]
    fn prop_decay_survivors_equal_prior_times_factor(
        strengths in proptest::collection::vec(0.0f64..0.99, 1..20),
        factor in 0.05f64..0.99,
        min_strength in 0.0f64..0.5,
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        for (i, s) in strengths.iter().enumerate() {
            engine.reinforce_link("hub", &format!("n{i:03}"), *s, MAX_LINK_STRENGTH).unwrap();
        }
        engine.decay_links(factor, min_strength).unwrap();

        let remaining = engine.links_of("hub", 0.0, 1000).unwrap();
        for (name, strength) in &remaining {
            let idx: usize = name[1..].parse().unwrap();
            prop_assert_eq!(*strength, strengths[idx] * factor);
            prop_assert!(*strength >= min_strength);
        }
        let expected = strengths.iter().filter(|s| **s * factor >= min_strength).count();
        prop_assert_eq!(remaining.len(), expected);
    }
}
