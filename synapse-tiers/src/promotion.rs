//! Merging a promoted text into a long-term fact.

use chrono::Utc;
use synapse_core::models::{FactType, HeaLevel, LongTermFact};

/// One promotion request.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    pub key: String,
    pub text: String,
    pub level: HeaLevel,
    /// `total / 5`, in `[0, 1]`.
    pub weight: f64,
    pub fact_type: FactType,
}

impl Promotion {
    pub fn new(
        key: impl Into<String>,
        text: impl Into<String>,
        level: HeaLevel,
        weight: f64,
        fact_type: FactType,
    ) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            level,
            weight,
            fact_type,
        }
    }

    /// Merge into `existing` (or a fresh fact). Identical texts are never
    /// duplicated, weight keeps the maximum, and `l1 ⊆ l2 ⊆ l3` holds after.
    pub fn apply(&self, existing: Option<LongTermFact>) -> LongTermFact {
        let mut fact = existing.unwrap_or_else(|| LongTermFact::new(&self.key, self.fact_type));
        let text = self.text.trim();
        if !text.is_empty() {
            fact.insert_at(self.level, text);
        }
        fact.repair_monotonic();
        let weight = if self.weight.is_finite() {
            self.weight.clamp(0.0, 1.0)
        } else {
            0.0
        };
        fact.weight = fact.weight.max(weight);
        fact.updated_at = Utc::now();
        fact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_promotion_mirrors_into_l3() {
        let fact = Promotion::new(
            "philosophy.values.honesty",
            "Believes honesty matters most",
            HeaLevel::L2,
            0.94,
            FactType::Philosophy,
        )
        .apply(None);

        assert!(fact.l1_value.is_empty());
        assert_eq!(fact.l2_value, vec!["Believes honesty matters most"]);
        assert_eq!(fact.l3_value, vec!["Believes honesty matters most"]);
        assert_eq!(fact.fact_type, FactType::Philosophy);
        assert!((fact.weight - 0.94).abs() < 1e-12);
    }

    #[test]
    fn merge_keeps_max_weight_and_skips_duplicates() {
        let first =
            Promotion::new("user.general.x", "likes tea", HeaLevel::L3, 0.7, FactType::Identity)
                .apply(None);
        let second =
            Promotion::new("user.general.x", "likes tea", HeaLevel::L3, 0.6, FactType::Identity)
                .apply(Some(first));

        assert_eq!(second.l3_value, vec!["likes tea"]);
        assert!((second.weight - 0.7).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_weight_is_clamped() {
        let fact =
            Promotion::new("user.general.x", "likes tea", HeaLevel::L3, 7.0, FactType::Identity)
                .apply(None);
        assert_eq!(fact.weight, 1.0);
    }
}
