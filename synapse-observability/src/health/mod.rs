pub mod reporter;
pub mod subsystem_checks;

pub use reporter::{HealthReporter, HealthSnapshot, TaskHealth};
pub use subsystem_checks::SubsystemChecker;
