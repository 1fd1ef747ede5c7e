//! Degradation events with their recovery status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use synapse_core::models::DegradationEvent;

use crate::tracing_setup::events;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Bounded history of degradation events, oldest dropped first.
#[derive(Debug, Clone)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
    capacity: usize,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::with_capacity(1_000)
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, event: DegradationEvent) {
        events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);
        if self.events.len() >= self.capacity {
            self.events.remove(0);
        }
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Mark every active degradation of `component` as recovered.
    /// Returns how many were closed.
    pub fn mark_recovered(&mut self, component: &str) -> usize {
        let now = Utc::now();
        let mut closed = 0;
        for tracked in self.events.iter_mut() {
            if tracked.event.component == component
                && tracked.recovery_status == RecoveryStatus::Active
            {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
                closed += 1;
            }
        }
        if closed > 0 {
            events::component_recovered(component);
        }
        closed
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.events.iter().any(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        })
    }

    /// Events for `component` in the last `window_secs` seconds.
    pub fn count_recent(&self, component: &str, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.events
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }

    /// How long `component` has been continuously degraded.
    pub fn degraded_duration(&self, component: &str) -> Option<chrono::Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| {
                t.event.component == component && t.recovery_status == RecoveryStatus::Active
            })
            .map(|t| t.event.timestamp)
            .min()?;
        Some(Utc::now() - earliest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_closes_active_events() {
        let mut tracker = DegradationTracker::new();
        tracker.record(DegradationEvent::new("embeddings", "timeout", "keyword"));
        tracker.record(DegradationEvent::new("embeddings", "timeout", "keyword"));
        tracker.record(DegradationEvent::new("scorer", "malformed", "neutral"));

        assert!(tracker.is_degraded("embeddings"));
        assert_eq!(tracker.mark_recovered("embeddings"), 2);
        assert!(!tracker.is_degraded("embeddings"));
        assert_eq!(tracker.active_degradations().len(), 1);
        assert_eq!(tracker.count_recent("embeddings", 60), 2);
        assert!(tracker.degraded_duration("scorer").is_some());
        assert!(tracker.degraded_duration("embeddings").is_none());
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut tracker = DegradationTracker::with_capacity(2);
        for component in ["a", "b", "c"] {
            tracker.record(DegradationEvent::new(component, "x", "y"));
        }
        let names: Vec<&str> = tracker
            .events()
            .iter()
            .map(|t| t.event.component.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c"]);
    }
}
