//! Domain services
//!
//! Pure timing computations. Nothing here touches a store or the clock.

pub mod distribution;
pub mod send_time;
pub mod throttling;
pub mod validation;

pub use distribution::distribute_email_timing;
pub use send_time::{calculate_optimal_send_time, plan_sequence, PlannedStep};
pub use throttling::{evaluate_throttling, BlockReason, ThrottlingDecision};
pub use validation::{validate_sequence_timing, TimingWarning};
