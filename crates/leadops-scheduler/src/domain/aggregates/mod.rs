//! Aggregates module

pub mod sequence;
pub mod throttling_state;

pub use sequence::{OutreachStep, Sequence, SequenceError, MAX_WAIT_SECONDS};
pub use throttling_state::ThrottlingState;
