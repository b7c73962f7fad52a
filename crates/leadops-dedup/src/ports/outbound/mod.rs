//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must implement.

use async_trait::async_trait;
use leadops_common::RepoResult;

use crate::domain::aggregates::Lead;
use crate::domain::value_objects::{AnalysisScope, EntityId};

/// Lead store port
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Snapshot of every lead in scope, preferably oldest-created first
    async fn fetch_leads(&self, scope: &AnalysisScope) -> RepoResult<Vec<Lead>>;

    /// Delete a batch of leads atomically.
    ///
    /// Returns how many leads were actually deleted; ids that no longer
    /// exist are ignored. If any lead in the batch is still referenced by
    /// other data the whole call fails with
    /// [`RepositoryError::ConstraintViolation`](leadops_common::RepositoryError::ConstraintViolation).
    async fn delete_leads(&self, ids: &[EntityId]) -> RepoResult<u64>;
}
