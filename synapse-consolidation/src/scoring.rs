//! Fact scoring and the promotion decision.

use serde::{Deserialize, Serialize};
use synapse_core::config::ConsolidationConfig;
use synapse_core::models::{HeaLevel, ScoreBreakdown};
use synapse_core::traits::IFactScorer;
use tracing::warn;

/// Outcome of the threshold comparison for one scored fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Promote to L2, mirrored into L3.
    PromoteL2,
    PromoteL3,
    /// Mark consolidated without a long-term write.
    Discard,
    /// Leave pending for the next run.
    Skip,
}

impl Destination {
    /// Level written by a promotion.
    pub fn level(self) -> Option<HeaLevel> {
        match self {
            Self::PromoteL2 => Some(HeaLevel::L2),
            Self::PromoteL3 => Some(HeaLevel::L3),
            Self::Discard | Self::Skip => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PromoteL2 => "promote_l2",
            Self::PromoteL3 => "promote_l3",
            Self::Discard => "discard",
            Self::Skip => "skip",
        }
    }
}

/// Compare a 1-5 total against the thresholds.
///
/// `total >= l2` → L2, `l3 <= total < l2` → L3, `total <= discard` →
/// discard, anything between discard and l3 is skipped.
pub fn decide(total: f64, config: &ConsolidationConfig) -> Destination {
    if total >= config.l2_threshold {
        Destination::PromoteL2
    } else if total >= config.l3_threshold {
        Destination::PromoteL3
    } else if total <= config.discard_threshold {
        Destination::Discard
    } else {
        Destination::Skip
    }
}

/// Score through the external scorer, falling back to neutral on failure
/// or malformed dimensions.
pub fn score_fact(scorer: &dyn IFactScorer, text: &str, context: &str) -> ScoreBreakdown {
    match scorer.score(text, context) {
        Ok(score) if score.is_well_formed() => ScoreBreakdown::from(&score),
        Ok(score) => {
            warn!(
                scorer = scorer.name(),
                permanence = score.permanence,
                relevance = score.relevance,
                identity = score.identity,
                "scorer returned out-of-range dimensions, using neutral score"
            );
            ScoreBreakdown::neutral()
        }
        Err(e) => {
            warn!(scorer = scorer.name(), error = %e, "scorer failed, using neutral score");
            ScoreBreakdown::neutral()
        }
    }
}
