use std::sync::Arc;

use proptest::prelude::*;
use synapse_core::models::{FactType, HeaLevel};
use synapse_storage::StorageEngine;
use synapse_tiers::{Promotion, TieredFactStore};

fn level() -> impl Strategy<Value = HeaLevel> {
    prop_oneof![Just(HeaLevel::L1), Just(HeaLevel::L2), Just(HeaLevel::L3)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn promotions_keep_levels_monotonic(
        steps in proptest::collection::vec((level(), "[a-d]{1,3}", 0.0f64..1.0), 1..20),
    ) {
        let store = TieredFactStore::new(Arc::new(StorageEngine::open_in_memory().unwrap()));
        let mut max_weight: f64 = 0.0;
        for (level, text, weight) in &steps {
            let promotion = Promotion::new(
                "user.general.k",
                text.clone(),
                *level,
                *weight,
                FactType::Identity,
            );
            let fact = store.promote(&promotion).unwrap();
            max_weight = max_weight.max(*weight);
            prop_assert!(fact.is_monotonic());
            prop_assert!((fact.weight - max_weight).abs() < 1e-12);
            let mut l3 = fact.l3_value.clone();
            l3.sort();
            l3.dedup();
            prop_assert_eq!(l3.len(), fact.l3_value.len());
        }
    }
}
