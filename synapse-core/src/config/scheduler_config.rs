use serde::{Deserialize, Serialize};

use super::defaults;

/// Schedule of a single periodic task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub enabled: bool,
    /// Base interval between runs, in seconds.
    pub interval_secs: u64,
    /// Interval multiplier per consecutive error.
    pub backoff_multiplier: f64,
    /// Ceiling of the backed-off interval, in seconds.
    pub max_backoff_secs: u64,
    /// Consecutive failures before the task enters the terminal error state.
    pub max_consecutive_errors: u32,
}

impl TaskConfig {
    /// Default schedule with the given interval.
    pub fn every(interval_secs: u64) -> Self {
        Self {
            enabled: true,
            interval_secs,
            backoff_multiplier: defaults::DEFAULT_BACKOFF_MULTIPLIER,
            max_backoff_secs: defaults::DEFAULT_MAX_BACKOFF_SECS,
            max_consecutive_errors: defaults::DEFAULT_MAX_CONSECUTIVE_ERRORS,
        }
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self::every(defaults::DEFAULT_HEALTH_INTERVAL_SECS)
    }
}

/// Scheduler configuration: one [`TaskConfig`] per periodic task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub consolidation: TaskConfig,
    pub decay: TaskConfig,
    pub memory_extraction: TaskConfig,
    pub health: TaskConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            consolidation: TaskConfig::every(defaults::DEFAULT_CONSOLIDATION_INTERVAL_SECS),
            decay: TaskConfig::every(defaults::DEFAULT_DECAY_INTERVAL_SECS),
            memory_extraction: TaskConfig::every(defaults::DEFAULT_EXTRACTION_INTERVAL_SECS),
            health: TaskConfig::every(defaults::DEFAULT_HEALTH_INTERVAL_SECS),
        }
    }
}
