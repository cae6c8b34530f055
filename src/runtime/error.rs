#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("worker error: {0}")]
    WorkerError(String),
    #[error("schedule error: {0}")]
    ScheduleError(String),
}
