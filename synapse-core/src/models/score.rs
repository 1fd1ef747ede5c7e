use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DIMENSION_SCORE, MIN_DIMENSION_SCORE};

/// Raw output of a fact scorer, each dimension on the 1-5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactScore {
    pub permanence: f64,
    pub relevance: f64,
    pub identity: f64,
    #[serde(default)]
    pub reasoning: String,
}

impl FactScore {
    pub fn new(permanence: f64, relevance: f64, identity: f64) -> Self {
        Self {
            permanence,
            relevance,
            identity,
            reasoning: String::new(),
        }
    }

    /// Every dimension is finite and within 1..=5.
    pub fn is_well_formed(&self) -> bool {
        [self.permanence, self.relevance, self.identity]
            .iter()
            .all(|v| v.is_finite() && (MIN_DIMENSION_SCORE..=MAX_DIMENSION_SCORE).contains(v))
    }
}

/// Weighted score used for consolidation decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub permanence: f64,
    pub relevance: f64,
    pub identity: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    pub const PERMANENCE_WEIGHT: f64 = 0.3;
    pub const RELEVANCE_WEIGHT: f64 = 0.3;
    pub const IDENTITY_WEIGHT: f64 = 0.4;

    /// Build a breakdown; the total is rounded to 6 decimals.
    pub fn from_dimensions(permanence: f64, relevance: f64, identity: f64) -> Self {
        let raw = Self::PERMANENCE_WEIGHT * permanence
            + Self::RELEVANCE_WEIGHT * relevance
            + Self::IDENTITY_WEIGHT * identity;
        Self {
            permanence,
            relevance,
            identity,
            total: round6(raw),
        }
    }

    /// Fallback used when the scorer fails or misbehaves.
    pub fn neutral() -> Self {
        Self::from_dimensions(3.0, 3.0, 3.0)
    }

    /// Total mapped onto a 0-10 scale.
    pub fn ten_point(&self) -> f64 {
        self.total * 2.0
    }

    /// Long-term weight in [0, 1].
    pub fn weight(&self) -> f64 {
        (self.total / MAX_DIMENSION_SCORE).clamp(0.0, 1.0)
    }
}

impl From<&FactScore> for ScoreBreakdown {
    fn from(score: &FactScore) -> Self {
        Self::from_dimensions(score.permanence, score.relevance, score.identity)
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_exact_after_rounding() {
        let score = ScoreBreakdown::from_dimensions(5.0, 4.0, 5.0);
        assert_eq!(score.total, 4.7);
        assert_eq!(ScoreBreakdown::neutral().total, 3.0);
        assert_eq!(ScoreBreakdown::from_dimensions(4.0, 4.0, 4.0).total, 4.0);
    }

    #[test]
    fn malformed_scores_detected() {
        assert!(FactScore::new(1.0, 5.0, 3.0).is_well_formed());
        assert!(!FactScore::new(0.0, 5.0, 3.0).is_well_formed());
        assert!(!FactScore::new(f64::NAN, 5.0, 3.0).is_well_formed());
    }
}
