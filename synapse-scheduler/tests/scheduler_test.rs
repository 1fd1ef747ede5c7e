use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use synapse_core::errors::{SchedulerError, SynapseError, SynapseResult};
use synapse_scheduler::{PeriodicTask, Scheduler, TaskKind, TaskSchedule, TaskSnapshot, TaskStatus};

#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    Fail,
    Panic,
    Slow(Duration),
}

struct TestTask {
    kind: TaskKind,
    behavior: Behavior,
    started: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
}

impl TestTask {
    fn new(kind: TaskKind, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            kind,
            behavior,
            started: Arc::new(AtomicUsize::new(0)),
            finished: Arc::new(AtomicUsize::new(0)),
        })
    }
}

impl PeriodicTask for TestTask {
    fn kind(&self) -> TaskKind {
        self.kind
    }

    fn run(&self) -> SynapseResult<()> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let result = match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(SynapseError::InvalidInput("boom".into())),
            Behavior::Panic => panic!("task exploded"),
            Behavior::Slow(d) => {
                std::thread::sleep(d);
                Ok(())
            }
        };
        self.finished.fetch_add(1, Ordering::SeqCst);
        result
    }
}

fn fast() -> TaskSchedule {
    TaskSchedule::every(Duration::from_millis(10)).with_max_backoff(Duration::from_millis(20))
}

async fn wait_for(
    scheduler: &Scheduler,
    kind: TaskKind,
    pred: impl Fn(&TaskSnapshot) -> bool,
) -> TaskSnapshot {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let snapshot = scheduler.status(kind).expect("registered");
        if pred(&snapshot) {
            return snapshot;
        }
        assert!(tokio::time::Instant::now() < deadline, "timed out: {snapshot:?}");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn healthy_task_runs_repeatedly() {
    let scheduler = Scheduler::new();
    let task = TestTask::new(TaskKind::Health, Behavior::Succeed);
    scheduler.register(task.clone(), fast());
    scheduler.start().unwrap();

    let snapshot = wait_for(&scheduler, TaskKind::Health, |s| s.run_count >= 3).await;

    assert_eq!(snapshot.error_count, 0);
    assert!(snapshot.last_success.is_some());
    scheduler.shutdown().await;
}

#[tokio::test]
async fn failures_back_off_into_terminal_error_then_restart() {
    let scheduler = Scheduler::new();
    let task = TestTask::new(TaskKind::Decay, Behavior::Fail);
    scheduler.register(task.clone(), fast().with_max_consecutive_errors(3));
    scheduler.start().unwrap();

    let parked = wait_for(&scheduler, TaskKind::Decay, |s| s.status == TaskStatus::Error).await;
    assert_eq!(parked.consecutive_errors, 3);
    assert_eq!(parked.run_count, 3);
    assert!(parked.last_error.as_deref().is_some_and(|e| e.contains("boom")));

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(task.started.load(Ordering::SeqCst), 3, "parked task must not run");

    scheduler.restart(TaskKind::Decay).unwrap();
    let revived = scheduler.status(TaskKind::Decay).unwrap();
    assert_eq!(revived.consecutive_errors, 0);
    assert!(revived.status.is_active());

    wait_for(&scheduler, TaskKind::Decay, |s| s.status == TaskStatus::Error).await;
    assert_eq!(task.started.load(Ordering::SeqCst), 6);
    scheduler.shutdown().await;
}

#[tokio::test]
async fn restart_of_active_task_is_rejected() {
    let scheduler = Scheduler::new();
    scheduler.register(TestTask::new(TaskKind::Health, Behavior::Succeed), fast());
    scheduler.start().unwrap();

    let err = scheduler.restart(TaskKind::Health).unwrap_err();
    assert!(matches!(
        err,
        SynapseError::SchedulerError(SchedulerError::AlreadyRunning { .. })
    ));
    scheduler.shutdown().await;
}

#[tokio::test]
async fn panic_degrades_only_its_own_task() {
    let scheduler = Scheduler::new();
    let broken = TestTask::new(TaskKind::MemoryExtraction, Behavior::Panic);
    let healthy = TestTask::new(TaskKind::Health, Behavior::Succeed);
    scheduler.register(broken, fast().with_max_consecutive_errors(2));
    scheduler.register(healthy, fast());
    scheduler.start().unwrap();

    let parked = wait_for(&scheduler, TaskKind::MemoryExtraction, |s| {
        s.status == TaskStatus::Error
    })
    .await;
    assert!(parked
        .last_error
        .as_deref()
        .is_some_and(|e| e.contains("panicked")));

    let before = scheduler.status(TaskKind::Health).unwrap().run_count;
    wait_for(&scheduler, TaskKind::Health, |s| s.run_count > before).await;
    scheduler.shutdown().await;
}

#[tokio::test]
async fn disabled_task_never_runs_on_schedule() {
    let scheduler = Scheduler::new();
    let task = TestTask::new(TaskKind::Consolidation, Behavior::Succeed);
    scheduler.register(task.clone(), fast().disabled());
    scheduler.start().unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(task.started.load(Ordering::SeqCst), 0);
    assert_eq!(
        scheduler.status(TaskKind::Consolidation).unwrap().status,
        TaskStatus::Disabled
    );

    let snapshot = scheduler.run_now(TaskKind::Consolidation).await.unwrap();
    assert_eq!(snapshot.run_count, 1);
    assert_eq!(snapshot.status, TaskStatus::Disabled);
    scheduler.shutdown().await;
}

#[tokio::test]
async fn run_now_reports_failures_and_unknown_tasks() {
    let scheduler = Scheduler::new();
    scheduler.register(
        TestTask::new(TaskKind::Decay, Behavior::Fail),
        TaskSchedule::every(Duration::from_secs(3600)),
    );

    let snapshot = scheduler.run_now(TaskKind::Decay).await.unwrap();
    assert_eq!(snapshot.error_count, 1);
    assert_eq!(snapshot.consecutive_errors, 1);

    let err = scheduler.run_now(TaskKind::Health).await.unwrap_err();
    assert!(matches!(
        err,
        SynapseError::SchedulerError(SchedulerError::UnknownTask { .. })
    ));
}

#[tokio::test]
async fn overlapping_manual_runs_are_rejected() {
    let scheduler = Scheduler::new();
    scheduler.register(
        TestTask::new(TaskKind::Consolidation, Behavior::Slow(Duration::from_millis(100))),
        TaskSchedule::every(Duration::from_secs(3600)),
    );

    let (a, b) = tokio::join!(
        scheduler.run_now(TaskKind::Consolidation),
        scheduler.run_now(TaskKind::Consolidation)
    );

    let busy = [a, b]
        .into_iter()
        .filter(|r| {
            matches!(
                r,
                Err(SynapseError::SchedulerError(SchedulerError::AlreadyRunning { .. }))
            )
        })
        .count();
    assert_eq!(busy, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_waits_for_in_flight_runs() {
    let scheduler = Scheduler::new();
    let task = TestTask::new(TaskKind::Consolidation, Behavior::Slow(Duration::from_millis(150)));
    scheduler.register(task.clone(), fast());
    scheduler.start().unwrap();

    wait_for(&scheduler, TaskKind::Consolidation, |s| s.status == TaskStatus::Running).await;
    scheduler.shutdown().await;

    assert_eq!(
        task.started.load(Ordering::SeqCst),
        task.finished.load(Ordering::SeqCst)
    );
    assert_eq!(
        scheduler.status(TaskKind::Consolidation).unwrap().status,
        TaskStatus::Stopped
    );
    assert!(scheduler.is_shut_down());

    let err = scheduler.run_now(TaskKind::Consolidation).await.unwrap_err();
    assert!(matches!(err, SynapseError::SchedulerError(SchedulerError::ShutDown)));
}
