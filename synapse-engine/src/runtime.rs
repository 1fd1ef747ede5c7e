//! Runtime: an engine plus the scheduler driving its periodic tasks.

use std::sync::Arc;

use synapse_core::errors::SynapseResult;
use synapse_core::models::HealthReport;
use synapse_scheduler::{Scheduler, TaskKind, TaskSnapshot};

use crate::engine::Engine;
use crate::tasks::build_scheduler;

pub struct Runtime {
    engine: Arc<Engine>,
    scheduler: Scheduler,
}

impl Runtime {
    /// Wrap `engine` and register the task table. Workers are not spawned
    /// until [`start`](Self::start).
    pub fn new(engine: Engine) -> Self {
        let engine = Arc::new(engine);
        let scheduler = build_scheduler(&engine);
        Self { engine, scheduler }
    }

    /// Spawn the workers. Must be called from within a tokio runtime.
    pub fn start(&self) -> SynapseResult<()> {
        self.scheduler.start()
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub async fn run_now(&self, kind: TaskKind) -> SynapseResult<TaskSnapshot> {
        self.scheduler.run_now(kind).await
    }

    pub fn restart(&self, kind: TaskKind) -> SynapseResult<()> {
        self.scheduler.restart(kind)
    }

    /// A fresh health report including every task's state.
    pub fn health(&self) -> HealthReport {
        self.engine.health(&self.scheduler.statuses())
    }

    /// Stop scheduling and wait for in-flight task runs.
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
    }
}
