use proptest::prelude::*;
use synapse_core::config::ConsolidationConfig;
use synapse_core::models::{FactType, ScoreBreakdown};
use synapse_consolidation::extraction::parse::find_balanced;
use synapse_consolidation::{classify_destination, decide, generate_key, Destination};
use synapse_graph::concepts::is_hierarchical_key;

fn rank(d: Destination) -> u8 {
    match d {
        Destination::Discard => 0,
        Destination::Skip => 1,
        Destination::PromoteL3 => 2,
        Destination::PromoteL2 => 3,
    }
}

proptest! {
    #[test]
    fn decisions_are_monotone_in_total(
        a in (1u8..=5, 1u8..=5, 1u8..=5),
        b in (1u8..=5, 1u8..=5, 1u8..=5),
    ) {
        let config = ConsolidationConfig::default();
        let sa = ScoreBreakdown::from_dimensions(a.0 as f64, a.1 as f64, a.2 as f64);
        let sb = ScoreBreakdown::from_dimensions(b.0 as f64, b.1 as f64, b.2 as f64);
        if sa.total <= sb.total {
            prop_assert!(rank(decide(sa.total, &config)) <= rank(decide(sb.total, &config)));
        }
    }

    #[test]
    fn generated_keys_are_hierarchical_under_their_root(text in "[A-Za-z ,.'!]{0,80}") {
        let fact_type = classify_destination(&text);
        let key = generate_key(&text, fact_type, None, 4);
        prop_assert!(is_hierarchical_key(&key), "{}", key);
        let root = match fact_type {
            FactType::Identity => "user.",
            FactType::Philosophy => "philosophy.",
        };
        prop_assert!(key.starts_with(root));
        prop_assert!(key.split('.').count() <= 6);
    }

    #[test]
    fn bracket_matcher_never_panics(text in "\\PC{0,200}") {
        for (start, _) in text.match_indices('[') {
            if let Some(slice) = find_balanced(&text, start) {
                prop_assert!(slice.starts_with('['));
            }
        }
    }
}
