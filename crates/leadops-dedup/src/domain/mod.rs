//! Domain module
//!
//! Contains all deduplication and data-quality logic. Everything here is
//! pure: it takes lead snapshots and returns reports or plans.

pub mod aggregates;
pub mod services;
pub mod value_objects;

pub use aggregates::*;
pub use services::*;
pub use value_objects::*;
