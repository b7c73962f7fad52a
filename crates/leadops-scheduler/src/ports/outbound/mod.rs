//! Outbound ports (Repository traits)

use async_trait::async_trait;
use leadops_common::RepoResult;

use crate::domain::aggregates::ThrottlingState;
use crate::domain::value_objects::SenderIdentity;

/// Throttling-state store port
#[async_trait]
pub trait ThrottleStateRepository: Send + Sync {
    /// Current state of a sender; `None` if it has never sent
    async fn read_state(&self, sender: &SenderIdentity) -> RepoResult<Option<ThrottlingState>>;

    /// Replace a sender's state
    async fn write_state(&self, state: &ThrottlingState) -> RepoResult<()>;
}
