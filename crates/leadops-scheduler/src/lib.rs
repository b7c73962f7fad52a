//! LeadOps Outreach Timing Scheduler
//!
//! Decides when outreach may go out: per-sender throttling, step send times
//! and spacing of bulk email sends.
//!
//! ## Architecture
//!
//! - **Domain Layer**: sequences, throttling state, and the pure timing
//!   rules (`evaluate_throttling`, `calculate_optimal_send_time`,
//!   `distribute_email_timing`, `validate_sequence_timing`)
//! - **Application Layer**: `ThrottlingService`
//! - **Ports Layer**: `ThrottleStateRepository` (outbound), `ThrottlingUseCases` (inbound)
//! - **Infrastructure Layer**: in-memory throttling store

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use application::{SchedulerError, ThrottlingService};
pub use domain::aggregates::{OutreachStep, Sequence, SequenceError, ThrottlingState};
pub use domain::services::{
    calculate_optimal_send_time, distribute_email_timing, evaluate_throttling, plan_sequence,
    validate_sequence_timing, BlockReason, PlannedStep, ThrottlingDecision, TimingWarning,
};
pub use domain::value_objects::{ChannelType, EntityId, ScheduledSend, SenderIdentity, UnknownChannel};
pub use infrastructure::InMemoryThrottleStateRepository;
pub use ports::inbound::ThrottlingUseCases;
pub use ports::outbound::ThrottleStateRepository;
