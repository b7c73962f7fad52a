//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces.

use async_trait::async_trait;

use crate::application::dto::RemovalResult;
use crate::application::DedupError;
use crate::domain::aggregates::Lead;
use crate::domain::services::{AnalysisReport, DuplicateGroup};
use crate::domain::value_objects::AnalysisScope;

/// Lead data-quality use cases
#[async_trait]
pub trait LeadQualityUseCases: Send + Sync {
    /// Fetch the scope and analyze it
    async fn analyze_scope(&self, scope: &AnalysisScope) -> Result<AnalysisReport, DedupError>;

    /// Collapse duplicate groups, keeping one canonical lead per group
    async fn remove_duplicates(&self, groups: &[DuplicateGroup]) -> RemovalResult;

    /// Delete leads with neither a valid phone nor a valid email
    async fn cleanup_invalid(&self, leads: &[Lead]) -> RemovalResult;

    /// Fetch, analyze and collapse duplicates in one call
    async fn deduplicate_scope(&self, scope: &AnalysisScope) -> Result<RemovalResult, DedupError>;

    /// Fetch and delete uncontactable leads in one call
    async fn cleanup_scope(&self, scope: &AnalysisScope) -> Result<RemovalResult, DedupError>;
}
