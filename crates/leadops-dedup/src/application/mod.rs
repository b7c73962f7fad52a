//! Application layer
//!
//! Orchestrates use cases over the lead store.

pub mod commands;
pub mod dto;
pub mod error;

pub use commands::DeduplicationService;
pub use dto::*;
pub use error::DedupError;
