use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::TaskKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Idle,
    Running,
    /// Waiting out a backed-off delay after a failure.
    BackingOff,
    /// Terminal until `restart`.
    Error,
    Disabled,
    Stopped,
}

impl TaskStatus {
    /// The worker is alive and will run the task again.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Idle | Self::Running | Self::BackingOff)
    }
}

/// Point-in-time view of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub kind: TaskKind,
    pub status: TaskStatus,
    pub run_count: u64,
    pub error_count: u64,
    pub consecutive_errors: u32,
    pub last_error: Option<String>,
    pub last_run: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
}

impl TaskSnapshot {
    pub fn new(kind: TaskKind, status: TaskStatus) -> Self {
        Self {
            kind,
            status,
            run_count: 0,
            error_count: 0,
            consecutive_errors: 0,
            last_error: None,
            last_run: None,
            last_success: None,
        }
    }
}
