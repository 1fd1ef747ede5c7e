/// Scheduler errors.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("task not registered: {task}")]
    UnknownTask { task: String },

    #[error("task {task} is already running")]
    AlreadyRunning { task: String },

    #[error("task {task} panicked: {details}")]
    TaskPanicked { task: String, details: String },

    #[error("scheduler is shut down")]
    ShutDown,
}
