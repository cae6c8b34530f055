mod error;
mod worker;

pub use error::RuntimeError;
pub use worker::{reminder::ReminderWorker, Worker, WorkerPool};
