//! Domain module
//!
//! Sequences, throttling state and the pure timing rules over them.

pub mod aggregates;
pub mod services;
pub mod value_objects;

pub use aggregates::*;
pub use services::*;
pub use value_objects::*;
