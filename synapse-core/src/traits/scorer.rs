use crate::errors::SynapseResult;
use crate::models::FactScore;

/// Rates a candidate fact on permanence, relevance and identity (1-5 each).
pub trait IFactScorer: Send + Sync {
    fn score(&self, fact_text: &str, context: &str) -> SynapseResult<FactScore>;

    fn name(&self) -> &str {
        "scorer"
    }
}
