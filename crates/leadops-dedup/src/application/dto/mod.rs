//! Data Transfer Objects (DTOs)
//!
//! Remediation results handed back to callers. They always say how much of
//! an operation succeeded, was skipped, or failed.

use leadops_common::ErrorKind;
use serde::Serialize;

use crate::domain::value_objects::EntityId;

/// Lead left in place on purpose
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedLead {
    pub lead_id: EntityId,
    pub kind: ErrorKind,
    pub reason: String,
}

/// Delete call that failed
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    /// Duplicate group label or batch number
    pub label: String,
    pub lead_ids: Vec<EntityId>,
    pub kind: ErrorKind,
    pub message: String,
}

/// Overall outcome of a remediation run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalOutcome {
    /// Nothing matched the selection
    NothingToDo,
    /// Every selected lead was deleted or deliberately skipped
    Complete,
    /// Some deletes failed, others went through
    Partial,
    /// Every attempted delete failed
    Failed,
}

/// Aggregate result of `remove_duplicates` / `cleanup_invalid`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RemovalResult {
    /// Leads selected for deletion
    pub requested: usize,
    /// Leads the store reports as deleted
    pub removed: u64,
    pub skipped: Vec<SkippedLead>,
    pub failures: Vec<BatchFailure>,
}

impl RemovalResult {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.iter().map(|f| f.lead_ids.len()).sum()
    }

    pub fn outcome(&self) -> RemovalOutcome {
        if self.requested == 0 {
            RemovalOutcome::NothingToDo
        } else if self.failures.is_empty() {
            RemovalOutcome::Complete
        } else if self.removed > 0 || !self.skipped.is_empty() {
            RemovalOutcome::Partial
        } else {
            RemovalOutcome::Failed
        }
    }

    /// Error kind summarizing the run, if anything failed
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.outcome() {
            RemovalOutcome::Partial => Some(ErrorKind::PartialBatchFailure),
            RemovalOutcome::Failed => self.failures.first().map(|f| f.kind),
            _ => None,
        }
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|f| format!("{}: {}", f.label, f.message))
            .collect()
    }

    pub(crate) fn merge(&mut self, other: RemovalResult) {
        self.requested += other.requested;
        self.removed += other.removed;
        self.skipped.extend(other.skipped);
        self.failures.extend(other.failures);
    }
}
