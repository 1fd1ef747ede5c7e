use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured event emitted to an event sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalEvent {
    pub kind: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl OperationalEvent {
    pub fn new(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
            created_at: Utc::now(),
        }
    }
}
