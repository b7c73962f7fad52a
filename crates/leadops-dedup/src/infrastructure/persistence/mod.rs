//! In-memory lead store
//!
//! Backs tests and the file-based CLI. Supports the failure modes the
//! engine has to tolerate: an unreachable store, leads protected by
//! referential constraints, and leads whose delete always errors.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use leadops_common::{RepoResult, RepositoryError};
use parking_lot::RwLock;

use crate::domain::aggregates::Lead;
use crate::domain::value_objects::{AnalysisScope, EntityId};
use crate::ports::outbound::LeadRepository;

#[derive(Default)]
pub struct InMemoryLeadRepository {
    leads: RwLock<Vec<Lead>>,
    protected: RwLock<HashSet<EntityId>>,
    poisoned: RwLock<HashSet<EntityId>>,
    unavailable: AtomicBool,
    delete_calls: AtomicUsize,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leads(leads: Vec<Lead>) -> Self {
        Self {
            leads: RwLock::new(leads),
            ..Self::default()
        }
    }

    pub fn insert(&self, lead: Lead) {
        self.leads.write().push(lead);
    }

    /// Mark a lead as referenced by other data (e.g. call history)
    pub fn protect(&self, id: impl Into<EntityId>) {
        self.protected.write().insert(id.into());
    }

    /// Make every delete batch containing this lead fail with a query error
    pub fn poison(&self, id: impl Into<EntityId>) {
        self.poisoned.write().insert(id.into());
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.leads.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.read().is_empty()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.leads.read().iter().any(|l| l.id() == id)
    }

    /// Current contents in insertion order
    pub fn snapshot(&self) -> Vec<Lead> {
        self.leads.read().clone()
    }

    /// Number of delete calls received
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("in-memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn fetch_leads(&self, scope: &AnalysisScope) -> RepoResult<Vec<Lead>> {
        self.check_available()?;

        let mut leads: Vec<Lead> = self.leads
            .read()
            .iter()
            .filter(|l| scope.includes(l))
            .cloned()
            .collect();
        leads.sort_by_key(|l| l.created_at());
        Ok(leads)
    }

    async fn delete_leads(&self, ids: &[EntityId]) -> RepoResult<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        if let Some(id) = ids.iter().find(|id| self.poisoned.read().contains(*id)) {
            return Err(RepositoryError::Query(format!("delete failed for lead {}", id)));
        }
        if let Some(id) = ids.iter().find(|id| self.protected.read().contains(*id)) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "lead {} is referenced by activity history",
                id
            )));
        }

        let doomed: HashSet<&EntityId> = ids.iter().collect();
        let mut leads = self.leads.write();
        let before = leads.len();
        leads.retain(|l| !doomed.contains(l.id()));
        Ok((before - leads.len()) as u64)
    }
}
