//! Degradation log: every time the engine falls back, an event is kept
//! here until the health reporter drains it. Bounded; the oldest events
//! are dropped once the log is full.

use std::collections::VecDeque;
use std::sync::Mutex;

use synapse_core::config::defaults::DEFAULT_MAX_PENDING_DEGRADATIONS;
use synapse_core::models::DegradationEvent;

pub struct DegradationLog {
    events: Mutex<VecDeque<DegradationEvent>>,
    capacity: usize,
}

impl Default for DegradationLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_PENDING_DEGRADATIONS)
    }
}

impl DegradationLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&self, failure: impl Into<String>, fallback: impl Into<String>) {
        let event = DegradationEvent::new("embeddings", failure, fallback);
        tracing::warn!(
            component = %event.component,
            failure = %event.failure,
            fallback = %event.fallback_used,
            "embedding degraded"
        );
        if let Ok(mut events) = self.events.lock() {
            if events.len() >= self.capacity {
                events.pop_front();
            }
            events.push_back(event);
        }
    }

    pub fn drain(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_log_drops_oldest_events() {
        let log = DegradationLog::with_capacity(3);
        for i in 0..5 {
            log.record(format!("failure {i}"), "keyword scoring");
        }
        assert_eq!(log.len(), 3);
        let failures: Vec<_> = log.drain().into_iter().map(|e| e.failure).collect();
        assert_eq!(failures, vec!["failure 2", "failure 3", "failure 4"]);
        assert!(log.is_empty());
    }

    #[test]
    fn default_log_is_bounded() {
        let log = DegradationLog::default();
        for _ in 0..(DEFAULT_MAX_PENDING_DEGRADATIONS + 10) {
            log.record("provider none unavailable", "keyword scoring");
        }
        assert_eq!(log.len(), DEFAULT_MAX_PENDING_DEGRADATIONS);
    }
}
