use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a short-term observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactStatus {
    Pending,
    Approved,
    PendingReview,
    Consolidated,
    Rejected,
}

impl FactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::PendingReview => "pending_review",
            Self::Consolidated => "consolidated",
            Self::Rejected => "rejected",
        }
    }

    /// Statuses picked up by a consolidation run.
    pub fn is_consolidation_candidate(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Statuses removed by a session clear.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Consolidated | Self::Rejected)
    }
}

impl fmt::Display for FactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "pending_review" => Ok(Self::PendingReview),
            "consolidated" => Ok(Self::Consolidated),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown fact status: {other}")),
        }
    }
}

/// A fact awaiting consolidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingFact {
    pub id: String,
    pub text: String,
    pub session_id: String,
    pub source: String,
    pub status: FactStatus,
    /// Total score on the 1-5 scale, set when the fact is scored.
    pub confidence_score: Option<f64>,
    pub hier_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PendingFact {
    pub fn new(
        text: impl Into<String>,
        session_id: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            session_id: session_id.into(),
            source: source.into(),
            status: FactStatus::Pending,
            confidence_score: None,
            hier_key: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.hier_key = Some(key.into());
        self
    }
}
