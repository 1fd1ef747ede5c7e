//! The periodic task table. Every background job the engine runs is
//! listed in [`task_table`]; nothing registers itself.

use std::sync::Arc;

use synapse_core::errors::SynapseResult;
use synapse_observability::task_span;
use synapse_scheduler::{PeriodicTask, Scheduler, StatusBoard, TaskKind, TaskSchedule};
use tracing::debug;

use crate::engine::Engine;

pub struct ConsolidationTask {
    engine: Arc<Engine>,
}

impl PeriodicTask for ConsolidationTask {
    fn kind(&self) -> TaskKind {
        TaskKind::Consolidation
    }

    fn run(&self) -> SynapseResult<()> {
        let _span = task_span!(self.kind()).entered();
        self.engine.consolidate().map(|_| ())
    }
}

pub struct DecayTask {
    engine: Arc<Engine>,
}

impl PeriodicTask for DecayTask {
    fn kind(&self) -> TaskKind {
        TaskKind::Decay
    }

    fn run(&self) -> SynapseResult<()> {
        let _span = task_span!(self.kind()).entered();
        self.engine.decay().map(|_| ())
    }
}

pub struct ExtractionTask {
    engine: Arc<Engine>,
}

impl PeriodicTask for ExtractionTask {
    fn kind(&self) -> TaskKind {
        TaskKind::MemoryExtraction
    }

    fn run(&self) -> SynapseResult<()> {
        let _span = task_span!(self.kind()).entered();
        self.engine.process_inbox().map(|_| ())
    }
}

/// Rebuilds the engine's health report, including the other tasks' states.
pub struct HealthTask {
    engine: Arc<Engine>,
    board: StatusBoard,
}

impl PeriodicTask for HealthTask {
    fn kind(&self) -> TaskKind {
        TaskKind::Health
    }

    fn run(&self) -> SynapseResult<()> {
        let _span = task_span!(self.kind()).entered();
        let report = self.engine.health(&self.board.statuses());
        debug!(status = ?report.overall_status, "health refreshed");
        Ok(())
    }
}

/// Every periodic task with its configured schedule.
pub fn task_table(
    engine: &Arc<Engine>,
    board: StatusBoard,
) -> Vec<(Arc<dyn PeriodicTask>, TaskSchedule)> {
    let schedules = &engine.config().scheduler;
    vec![
        (
            Arc::new(ConsolidationTask {
                engine: Arc::clone(engine),
            }) as Arc<dyn PeriodicTask>,
            TaskSchedule::from(&schedules.consolidation),
        ),
        (
            Arc::new(DecayTask {
                engine: Arc::clone(engine),
            }),
            TaskSchedule::from(&schedules.decay),
        ),
        (
            Arc::new(ExtractionTask {
                engine: Arc::clone(engine),
            }),
            TaskSchedule::from(&schedules.memory_extraction),
        ),
        (
            Arc::new(HealthTask {
                engine: Arc::clone(engine),
                board,
            }),
            TaskSchedule::from(&schedules.health),
        ),
    ]
}

/// A scheduler with the whole task table registered but not started.
pub fn build_scheduler(engine: &Arc<Engine>) -> Scheduler {
    let scheduler = Scheduler::new();
    for (task, schedule) in task_table(engine, scheduler.board()) {
        scheduler.register(task, schedule);
    }
    scheduler
}
