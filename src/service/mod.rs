pub mod countdown;
pub mod dialogue;
mod error;
pub mod health;
pub mod reminder;

pub use error::ServiceError;
