//! Inbound ports (Use case traits)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::SchedulerError;
use crate::domain::aggregates::ThrottlingState;
use crate::domain::services::ThrottlingDecision;
use crate::domain::value_objects::SenderIdentity;

/// Per-sender throttling use cases
#[async_trait]
pub trait ThrottlingUseCases: Send + Sync {
    /// May `sender` send now? Never fails; store outages follow the
    /// configured failure policy.
    async fn check_throttling(&self, sender: &SenderIdentity, daily_limit: u32) -> ThrottlingDecision;

    /// Count a successful send and return the updated state
    async fn record_send(
        &self,
        sender: &SenderIdentity,
        daily_limit: u32,
        sent_at: DateTime<Utc>,
    ) -> Result<ThrottlingState, SchedulerError>;
}
