//! Worker lifecycle: start, run_now, restart, shutdown.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use dashmap::DashMap;
use synapse_core::errors::{SchedulerError, SynapseResult};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::schedule::TaskSchedule;
use crate::status::{TaskSnapshot, TaskStatus};
use crate::task::{PeriodicTask, TaskKind};

/// A registered task and its timing policy.
#[derive(Clone)]
struct TaskEntry {
    task: Arc<dyn PeriodicTask>,
    schedule: TaskSchedule,
    /// Set while a body is executing; scheduled and manual runs never overlap.
    in_flight: Arc<AtomicBool>,
}

/// Result of one attempt to execute a task body.
enum Execution {
    Completed,
    Failed,
    Busy,
}

/// Shared view of the scheduler's task snapshots.
#[derive(Clone)]
pub struct StatusBoard(Arc<DashMap<TaskKind, TaskSnapshot>>);

impl StatusBoard {
    pub fn statuses(&self) -> Vec<TaskSnapshot> {
        let mut all: Vec<TaskSnapshot> = self.0.iter().map(|s| s.clone()).collect();
        all.sort_by_key(|s| s.kind);
        all
    }
}

pub struct Scheduler {
    entries: DashMap<TaskKind, TaskEntry>,
    snapshots: Arc<DashMap<TaskKind, TaskSnapshot>>,
    workers: Mutex<HashMap<TaskKind, JoinHandle<()>>>,
    shutdown_tx: watch::Sender<bool>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            entries: DashMap::new(),
            snapshots: Arc::new(DashMap::new()),
            workers: Mutex::new(HashMap::new()),
            shutdown_tx,
        }
    }

    /// Register (or replace) a task. Takes effect at the next `start` or
    /// `restart` of that task.
    pub fn register(&self, task: Arc<dyn PeriodicTask>, schedule: TaskSchedule) {
        let kind = task.kind();
        let status = if schedule.enabled {
            TaskStatus::Idle
        } else {
            TaskStatus::Disabled
        };
        self.entries.insert(
            kind,
            TaskEntry {
                task,
                schedule,
                in_flight: Arc::new(AtomicBool::new(false)),
            },
        );
        self.snapshots
            .entry(kind)
            .and_modify(|s| s.status = status)
            .or_insert_with(|| TaskSnapshot::new(kind, status));
    }

    /// Spawn a worker for every enabled task. Must be called from within a
    /// tokio runtime.
    pub fn start(&self) -> SynapseResult<()> {
        self.ensure_running()?;
        let mut kinds: Vec<TaskKind> = self.entries.iter().map(|e| *e.key()).collect();
        kinds.sort();
        for kind in kinds {
            let enabled = self
                .entries
                .get(&kind)
                .is_some_and(|e| e.schedule.enabled);
            if enabled && !self.worker_alive(kind) {
                self.spawn_worker(kind)?;
            }
        }
        info!(tasks = self.entries.len(), "scheduler started");
        Ok(())
    }

    /// Execute one run outside the schedule and return the resulting
    /// snapshot. Fails if the task is unknown or currently executing.
    pub async fn run_now(&self, kind: TaskKind) -> SynapseResult<TaskSnapshot> {
        self.ensure_running()?;
        let entry = self.entry(kind)?;
        match execute(kind, &entry, &self.snapshots).await {
            Execution::Busy => Err(SchedulerError::AlreadyRunning {
                task: kind.to_string(),
            }
            .into()),
            Execution::Completed | Execution::Failed => self.snapshot(kind),
        }
    }

    /// Revive a task parked in `Error`, `Stopped` or `Disabled`, with its
    /// consecutive error count reset.
    pub fn restart(&self, kind: TaskKind) -> SynapseResult<()> {
        self.ensure_running()?;
        self.entry(kind)?;
        let current = self.snapshot(kind)?;
        if current.status.is_active() {
            return Err(SchedulerError::AlreadyRunning {
                task: kind.to_string(),
            }
            .into());
        }
        update(&self.snapshots, kind, |s| {
            s.consecutive_errors = 0;
            s.status = TaskStatus::Idle;
        });
        info!(task = %kind, previous = ?current.status, "task restarted");
        self.spawn_worker(kind)
    }

    pub fn status(&self, kind: TaskKind) -> Option<TaskSnapshot> {
        self.snapshots.get(&kind).map(|s| s.clone())
    }

    /// Snapshots of every registered task, in `TaskKind` order.
    pub fn statuses(&self) -> Vec<TaskSnapshot> {
        self.board().statuses()
    }

    /// A cloneable read-only view of the task snapshots, for tasks that
    /// report on their siblings.
    pub fn board(&self) -> StatusBoard {
        StatusBoard(Arc::clone(&self.snapshots))
    }

    pub fn is_shut_down(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Stop scheduling and wait for in-flight runs to finish.
    pub async fn shutdown(&self) {
        if self.shutdown_tx.send_replace(true) {
            return;
        }
        let handles: Vec<(TaskKind, JoinHandle<()>)> = {
            let mut workers = self
                .workers
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            workers.drain().collect()
        };
        for (kind, handle) in handles {
            if let Err(e) = handle.await {
                error!(task = %kind, error = %e, "worker did not exit cleanly");
            }
        }
        for mut snapshot in self.snapshots.iter_mut() {
            if snapshot.status != TaskStatus::Error {
                snapshot.status = TaskStatus::Stopped;
            }
        }
        info!("scheduler shut down");
    }

    fn ensure_running(&self) -> SynapseResult<()> {
        if self.is_shut_down() {
            Err(SchedulerError::ShutDown.into())
        } else {
            Ok(())
        }
    }

    fn entry(&self, kind: TaskKind) -> SynapseResult<TaskEntry> {
        self.entries
            .get(&kind)
            .map(|e| e.clone())
            .ok_or_else(|| {
                SchedulerError::UnknownTask {
                    task: kind.to_string(),
                }
                .into()
            })
    }

    fn snapshot(&self, kind: TaskKind) -> SynapseResult<TaskSnapshot> {
        self.status(kind).ok_or_else(|| {
            SchedulerError::UnknownTask {
                task: kind.to_string(),
            }
            .into()
        })
    }

    fn worker_alive(&self, kind: TaskKind) -> bool {
        self.workers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&kind)
            .is_some_and(|handle| !handle.is_finished())
    }

    fn spawn_worker(&self, kind: TaskKind) -> SynapseResult<()> {
        let entry = self.entry(kind)?;
        let snapshots = self.snapshots.clone();
        let shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(worker_loop(kind, entry, snapshots, shutdown_rx));
        let mut workers = self
            .workers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = workers.insert(kind, handle) {
            // Parked workers are already exiting.
            previous.abort();
        }
        Ok(())
    }
}

async fn worker_loop(
    kind: TaskKind,
    entry: TaskEntry,
    snapshots: Arc<DashMap<TaskKind, TaskSnapshot>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    debug!(
        task = %kind,
        interval_ms = entry.schedule.interval.as_millis() as u64,
        "worker started"
    );
    loop {
        let consecutive = snapshots
            .get(&kind)
            .map_or(0, |s| s.consecutive_errors);
        let delay = entry.schedule.delay_for(consecutive);

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            changed = shutdown_rx.changed() => {
                // A dropped sender means the scheduler itself is gone.
                if changed.is_err() {
                    break;
                }
            }
        }
        if *shutdown_rx.borrow() {
            break;
        }

        if let Execution::Failed = execute(kind, &entry, &snapshots).await {
            let consecutive = snapshots.get(&kind).map_or(0, |s| s.consecutive_errors);
            if consecutive >= entry.schedule.max_consecutive_errors {
                update(&snapshots, kind, |s| s.status = TaskStatus::Error);
                error!(
                    task = %kind,
                    consecutive_errors = consecutive,
                    "task entered terminal error state"
                );
                return;
            }
        }
    }
    update(&snapshots, kind, |s| {
        if s.status != TaskStatus::Error {
            s.status = TaskStatus::Stopped;
        }
    });
    debug!(task = %kind, "worker stopped");
}

/// Run the task body once on the blocking pool and record the outcome.
async fn execute(
    kind: TaskKind,
    entry: &TaskEntry,
    snapshots: &DashMap<TaskKind, TaskSnapshot>,
) -> Execution {
    if entry
        .in_flight
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Execution::Busy;
    }
    let previous_status = snapshots.get(&kind).map(|s| s.status);
    update(snapshots, kind, |s| s.status = TaskStatus::Running);
    let started = Utc::now();

    let task = entry.task.clone();
    let outcome = match tokio::task::spawn_blocking(move || task.run()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(join) => Err(SchedulerError::TaskPanicked {
            task: kind.to_string(),
            details: join.to_string(),
        }
        .to_string()),
    };
    entry.in_flight.store(false, Ordering::SeqCst);

    let execution = match &outcome {
        Ok(()) => Execution::Completed,
        Err(_) => Execution::Failed,
    };
    update(snapshots, kind, |s| {
        s.run_count += 1;
        s.last_run = Some(started);
        match &outcome {
            Ok(()) => {
                s.consecutive_errors = 0;
                s.last_success = Some(Utc::now());
                s.status = TaskStatus::Idle;
            }
            Err(message) => {
                s.error_count += 1;
                s.consecutive_errors = s.consecutive_errors.saturating_add(1);
                s.last_error = Some(message.clone());
                s.status = TaskStatus::BackingOff;
            }
        }
        // A manual run of a parked task leaves it parked.
        if let Some(parked @ (TaskStatus::Error | TaskStatus::Stopped | TaskStatus::Disabled)) =
            previous_status
        {
            s.status = parked;
        }
    });
    match &outcome {
        Ok(()) => debug!(task = %kind, "task run completed"),
        Err(message) => warn!(task = %kind, error = %message, "task run failed"),
    }
    execution
}

fn update(
    snapshots: &DashMap<TaskKind, TaskSnapshot>,
    kind: TaskKind,
    f: impl FnOnce(&mut TaskSnapshot),
) {
    if let Some(mut snapshot) = snapshots.get_mut(&kind) {
        f(&mut snapshot);
    }
}
