//! Scheduler value objects

pub mod channel;
pub mod scheduled_send;
pub mod sender;

pub use channel::{ChannelType, UnknownChannel};
pub use leadops_common::EntityId;
pub use scheduled_send::ScheduledSend;
pub use sender::SenderIdentity;
