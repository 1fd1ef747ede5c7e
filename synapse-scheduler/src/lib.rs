//! # synapse-scheduler
//!
//! One tokio worker per registered task. Task bodies run on the blocking
//! pool; an error or panic in one task only backs that task off, and after
//! too many consecutive failures the task parks in a terminal `Error`
//! state until restarted.

pub mod schedule;
pub mod scheduler;
pub mod status;
pub mod task;

pub use schedule::TaskSchedule;
pub use scheduler::{Scheduler, StatusBoard};
pub use status::{TaskSnapshot, TaskStatus};
pub use task::{PeriodicTask, TaskKind};
