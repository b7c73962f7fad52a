//! Aggregates module

pub mod lead;

pub use lead::*;
