//! Command handlers

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use leadops_common::{ChannelLimits, FailurePolicy, ThrottlingConfig};

use crate::application::error::SchedulerError;
use crate::domain::aggregates::ThrottlingState;
use crate::domain::services::{evaluate_throttling, ThrottlingDecision};
use crate::domain::value_objects::{ChannelType, SenderIdentity};
use crate::ports::inbound::ThrottlingUseCases;
use crate::ports::outbound::ThrottleStateRepository;

/// Throttling application service.
///
/// Check-then-record is not atomic: two concurrent sends from one sender
/// may both be allowed. This is a best-effort limiter, not a quota.
pub struct ThrottlingService {
    state_repo: Arc<dyn ThrottleStateRepository>,
    min_delay: Duration,
    failure_policy: FailurePolicy,
    limits: ChannelLimits,
}

impl ThrottlingService {
    pub fn new(state_repo: Arc<dyn ThrottleStateRepository>, config: &ThrottlingConfig) -> Self {
        Self {
            state_repo,
            min_delay: Duration::minutes(i64::from(config.min_delay_minutes)),
            failure_policy: config.failure_policy,
            limits: config.daily_limits.clone(),
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Configured daily limit for a channel
    pub fn daily_limit_for(&self, channel: ChannelType) -> u32 {
        channel.daily_limit(&self.limits)
    }

    /// [`ThrottlingUseCases::check_throttling`] against an explicit clock
    pub async fn check_throttling_at(
        &self,
        sender: &SenderIdentity,
        daily_limit: u32,
        now: DateTime<Utc>,
    ) -> ThrottlingDecision {
        match self.state_repo.read_state(sender).await {
            Ok(state) => {
                let decision = evaluate_throttling(state.as_ref(), daily_limit, self.min_delay, now);
                if !decision.can_send {
                    tracing::debug!(
                        %sender,
                        reason = ?decision.reason,
                        wait_seconds = decision.wait_seconds,
                        sent_today = decision.sent_count_today,
                        "Send throttled"
                    );
                }
                decision
            }
            Err(e) => {
                tracing::warn!(
                    %sender,
                    error = %e,
                    policy = ?self.failure_policy,
                    "Throttling state unavailable, deciding without it"
                );
                ThrottlingDecision::store_unavailable(self.failure_policy, daily_limit)
            }
        }
    }
}

#[async_trait]
impl ThrottlingUseCases for ThrottlingService {
    async fn check_throttling(&self, sender: &SenderIdentity, daily_limit: u32) -> ThrottlingDecision {
        self.check_throttling_at(sender, daily_limit, Utc::now()).await
    }

    async fn record_send(
        &self,
        sender: &SenderIdentity,
        daily_limit: u32,
        sent_at: DateTime<Utc>,
    ) -> Result<ThrottlingState, SchedulerError> {
        let mut state = self
            .state_repo
            .read_state(sender)
            .await
            .map_err(SchedulerError::Store)?
            .unwrap_or_else(|| ThrottlingState::fresh(sender.clone(), daily_limit));

        state.daily_limit = daily_limit;
        state.record_send(sent_at);

        self.state_repo.write_state(&state).await.map_err(|e| {
            tracing::warn!(%sender, error = %e, "Failed to record send");
            SchedulerError::Store(e)
        })?;

        tracing::debug!(%sender, sent_today = state.sent_count_today, "Recorded send");
        Ok(state)
    }
}
