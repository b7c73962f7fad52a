//! Command handlers
//!
//! Application service that runs analysis and remediation against the lead
//! store.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use leadops_common::{DedupConfig, ErrorKind, RepositoryError};

use crate::application::dto::{BatchFailure, RemovalResult, SkippedLead};
use crate::application::error::DedupError;
use crate::domain::aggregates::Lead;
use crate::domain::services::{AnalysisReport, Contactability, DuplicateAnalyzer, DuplicateGroup, RemovalPlan};
use crate::domain::value_objects::{AnalysisScope, EntityId};
use crate::ports::inbound::LeadQualityUseCases;
use crate::ports::outbound::LeadRepository;

/// Deduplication application service.
///
/// Construct once at startup and share it; it holds no mutable state.
pub struct DeduplicationService {
    lead_repo: Arc<dyn LeadRepository>,
    analyzer: DuplicateAnalyzer,
    batch_size: usize,
}

impl DeduplicationService {
    pub fn new(lead_repo: Arc<dyn LeadRepository>, config: &DedupConfig) -> Self {
        Self {
            lead_repo,
            analyzer: DuplicateAnalyzer::new(config),
            batch_size: config.delete_batch_size.max(1),
        }
    }

    /// Cleanup followed by deduplication. Cleanup runs first so duplicate
    /// groups are computed over the leads that remain.
    pub async fn remediate_scope(&self, scope: &AnalysisScope) -> Result<RemovalResult, DedupError> {
        let mut result = self.cleanup_scope(scope).await?;
        result.merge(self.deduplicate_scope(scope).await?);
        Ok(result)
    }

    pub fn analyzer(&self) -> &DuplicateAnalyzer {
        &self.analyzer
    }

    /// Pure analysis over an already-fetched snapshot
    pub fn analyze(&self, leads: &[Lead], scope: &AnalysisScope) -> AnalysisReport {
        self.analyzer.analyze(leads, scope)
    }

    async fn fetch(&self, scope: &AnalysisScope) -> Result<Vec<Lead>, DedupError> {
        self.lead_repo.fetch_leads(scope).await.map_err(|e| {
            tracing::warn!(%scope, error = %e, "Lead fetch failed");
            DedupError::Fetch(e)
        })
    }

    /// Delete one batch. A constraint rejection on a multi-lead batch is
    /// retried lead by lead so only the referenced leads are skipped.
    async fn delete_batch(&self, label: &str, ids: &[EntityId], result: &mut RemovalResult) {
        match self.lead_repo.delete_leads(ids).await {
            Ok(removed) => {
                tracing::debug!(label, removed, "Deleted lead batch");
                result.removed += removed;
            }
            Err(e) if e.is_constraint_violation() && ids.len() > 1 => {
                tracing::debug!(label, batch = ids.len(), "Batch rejected by constraint, retrying per lead");
                for id in ids {
                    self.delete_one(label, id, result).await;
                }
            }
            Err(e) if e.is_constraint_violation() => Self::record_skip(&ids[0], &e, result),
            Err(e) => Self::record_failure(label, ids, &e, result),
        }
    }

    async fn delete_one(&self, label: &str, id: &EntityId, result: &mut RemovalResult) {
        match self.lead_repo.delete_leads(std::slice::from_ref(id)).await {
            Ok(removed) => result.removed += removed,
            Err(e) if e.is_constraint_violation() => Self::record_skip(id, &e, result),
            Err(e) => Self::record_failure(label, std::slice::from_ref(id), &e, result),
        }
    }

    fn record_skip(id: &EntityId, error: &RepositoryError, result: &mut RemovalResult) {
        tracing::debug!(lead_id = %id, reason = %error, "Skipping referenced lead");
        result.skipped.push(SkippedLead {
            lead_id: id.clone(),
            kind: ErrorKind::ConstraintViolation,
            reason: error.to_string(),
        });
    }

    fn record_failure(label: &str, ids: &[EntityId], error: &RepositoryError, result: &mut RemovalResult) {
        tracing::warn!(label, leads = ids.len(), error = %error, "Lead delete failed");
        result.failures.push(BatchFailure {
            label: label.to_string(),
            lead_ids: ids.to_vec(),
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    fn log_result(operation: &str, result: &RemovalResult) {
        tracing::info!(
            operation,
            requested = result.requested,
            removed = result.removed,
            skipped = result.skipped_count(),
            failed = result.failed_count(),
            outcome = ?result.outcome(),
            "Lead remediation finished"
        );
    }
}

#[async_trait]
impl LeadQualityUseCases for DeduplicationService {
    async fn analyze_scope(&self, scope: &AnalysisScope) -> Result<AnalysisReport, DedupError> {
        let leads = self.fetch(scope).await?;
        let report = self.analyzer.analyze(&leads, scope);

        tracing::info!(
            %scope,
            total = report.total_leads,
            groups = report.duplicate_groups.len(),
            duplicates = report.duplicate_count,
            neither = report.with_neither,
            malformed = report.invalid_records.len(),
            "Lead analysis complete"
        );

        Ok(report)
    }

    async fn remove_duplicates(&self, groups: &[DuplicateGroup]) -> RemovalResult {
        let plan = RemovalPlan::from_groups(groups);
        let mut result = RemovalResult {
            requested: plan.total_to_remove(),
            ..Default::default()
        };

        for group in plan.groups.iter().filter(|g| !g.remove.is_empty()) {
            let label = group.label();
            for chunk in group.remove.chunks(self.batch_size) {
                self.delete_batch(&label, chunk, &mut result).await;
            }
        }

        Self::log_result("remove_duplicates", &result);
        result
    }

    async fn cleanup_invalid(&self, leads: &[Lead]) -> RemovalResult {
        let classifier = self.analyzer.classifier();
        let mut seen: HashSet<&EntityId> = HashSet::new();
        let doomed: Vec<EntityId> = leads
            .iter()
            .filter(|lead| !lead.id().is_blank())
            .filter(|lead| classifier.classify(lead).contactability == Contactability::Neither)
            .filter(|lead| seen.insert(lead.id()))
            .map(|lead| lead.id().clone())
            .collect();

        let mut result = RemovalResult {
            requested: doomed.len(),
            ..Default::default()
        };

        for (batch, chunk) in doomed.chunks(self.batch_size).enumerate() {
            let label = format!("batch {}", batch + 1);
            self.delete_batch(&label, chunk, &mut result).await;
        }

        Self::log_result("cleanup_invalid", &result);
        result
    }

    async fn deduplicate_scope(&self, scope: &AnalysisScope) -> Result<RemovalResult, DedupError> {
        let report = self.analyze_scope(scope).await?;
        Ok(self.remove_duplicates(&report.duplicate_groups).await)
    }

    async fn cleanup_scope(&self, scope: &AnalysisScope) -> Result<RemovalResult, DedupError> {
        let leads = self.fetch(scope).await?;
        let in_scope: Vec<Lead> = leads.into_iter().filter(|l| scope.includes(l)).collect();
        Ok(self.cleanup_invalid(&in_scope).await)
    }
}
