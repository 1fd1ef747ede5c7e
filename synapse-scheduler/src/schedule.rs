use std::time::Duration;

use synapse_core::config::TaskConfig;

/// Timing policy of one task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSchedule {
    pub enabled: bool,
    pub interval: Duration,
    pub backoff_multiplier: f64,
    pub max_backoff: Duration,
    pub max_consecutive_errors: u32,
}

impl TaskSchedule {
    pub fn every(interval: Duration) -> Self {
        Self::from(&TaskConfig::every(1)).with_interval(interval)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    pub fn with_max_consecutive_errors(mut self, max: u32) -> Self {
        self.max_consecutive_errors = max;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// `interval * multiplier^consecutive_errors`, capped at `max_backoff`.
    /// Never shorter than `interval`.
    pub fn delay_for(&self, consecutive_errors: u32) -> Duration {
        if consecutive_errors == 0 {
            return self.interval;
        }
        let exponent = i32::try_from(consecutive_errors).unwrap_or(i32::MAX);
        let factor = self.backoff_multiplier.max(1.0).powi(exponent);
        let ceiling = self.max_backoff.max(self.interval);
        let secs = self.interval.as_secs_f64() * factor;
        if !secs.is_finite() || secs >= ceiling.as_secs_f64() {
            ceiling
        } else {
            Duration::from_secs_f64(secs)
        }
    }
}

impl From<&TaskConfig> for TaskSchedule {
    fn from(config: &TaskConfig) -> Self {
        Self {
            enabled: config.enabled,
            interval: Duration::from_secs(config.interval_secs),
            backoff_multiplier: config.backoff_multiplier,
            max_backoff: Duration::from_secs(config.max_backoff_secs),
            max_consecutive_errors: config.max_consecutive_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_then_caps() {
        let schedule = TaskSchedule::every(Duration::from_secs(10))
            .with_max_backoff(Duration::from_secs(60));
        assert_eq!(schedule.delay_for(0), Duration::from_secs(10));
        assert_eq!(schedule.delay_for(1), Duration::from_secs(20));
        assert_eq!(schedule.delay_for(2), Duration::from_secs(40));
        assert_eq!(schedule.delay_for(3), Duration::from_secs(60));
        assert_eq!(schedule.delay_for(u32::MAX), Duration::from_secs(60));
    }

    #[test]
    fn cap_below_interval_keeps_interval() {
        let schedule = TaskSchedule::from(&TaskConfig::every(86_400));
        assert_eq!(schedule.delay_for(3), Duration::from_secs(86_400));
    }
}
