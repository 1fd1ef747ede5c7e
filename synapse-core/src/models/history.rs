use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ScoreBreakdown;

/// Append-only record of one consolidation decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationHistoryRecord {
    pub fact_text: String,
    /// 0 for facts that were pending.
    pub from_level: u8,
    /// 0 for discarded facts, otherwise 1..=3.
    pub to_level: u8,
    pub score: ScoreBreakdown,
    pub reason: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}
