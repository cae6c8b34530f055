mod error;
mod model;
mod weekly;

pub use error::StorageError;
pub use model::{Record, WeekMeta, WeeklyLog};
pub use weekly::WeeklyLogStore;
