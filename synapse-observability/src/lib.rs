//! # synapse-observability
//!
//! Tracing subscriber setup, span macros and structured event helpers,
//! degradation tracking, and health report building.

pub mod degradation;
pub mod health;
pub mod sink;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use health::{HealthReporter, HealthSnapshot, TaskHealth};
pub use sink::TracingSink;
pub use tracing_setup::init_tracing;
