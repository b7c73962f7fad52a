//! Application layer

pub mod commands;
pub mod error;

pub use commands::ThrottlingService;
pub use error::SchedulerError;
