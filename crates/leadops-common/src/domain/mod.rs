//! Shared domain model
//!
//! - **Value Objects**: EntityId
//! - **Repositories**: error type shared by every outbound port

pub mod repositories;
pub mod value_objects;

pub use repositories::*;
pub use value_objects::*;
