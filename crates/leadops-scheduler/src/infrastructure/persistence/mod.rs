//! In-memory throttling-state store

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use leadops_common::{RepoResult, RepositoryError};

use crate::domain::aggregates::ThrottlingState;
use crate::domain::value_objects::SenderIdentity;
use crate::ports::outbound::ThrottleStateRepository;

#[derive(Default)]
pub struct InMemoryThrottleStateRepository {
    states: DashMap<SenderIdentity, ThrottlingState>,
    unavailable: AtomicBool,
}

impl InMemoryThrottleStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, state: ThrottlingState) {
        self.states.insert(state.sender.clone(), state);
    }

    pub fn get(&self, sender: &SenderIdentity) -> Option<ThrottlingState> {
        self.states.get(sender).map(|s| s.value().clone())
    }

    /// Simulate an unreachable store
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Zero every sender's daily count
    pub fn reset_daily_counts(&self) {
        for mut entry in self.states.iter_mut() {
            entry.value_mut().sent_count_today = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("throttling store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ThrottleStateRepository for InMemoryThrottleStateRepository {
    async fn read_state(&self, sender: &SenderIdentity) -> RepoResult<Option<ThrottlingState>> {
        self.check_available()?;
        Ok(self.get(sender))
    }

    async fn write_state(&self, state: &ThrottlingState) -> RepoResult<()> {
        self.check_available()?;
        self.insert(state.clone());
        Ok(())
    }
}
