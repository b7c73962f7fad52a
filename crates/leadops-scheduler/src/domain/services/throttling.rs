//! Throttling evaluation

use chrono::{DateTime, Duration, Utc};
use leadops_common::FailurePolicy;
use serde::Serialize;

use crate::domain::aggregates::ThrottlingState;

/// Why a send was held back
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    DailyLimitReached,
    MinDelayNotElapsed,
    StoreUnavailable,
}

/// Answer to "may this sender send now?"
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThrottlingDecision {
    pub can_send: bool,
    /// Seconds until the minimum spacing is satisfied; 0 when not delay-bound
    pub wait_seconds: u64,
    pub sent_count_today: u32,
    pub daily_limit: u32,
    pub last_sent_at: Option<DateTime<Utc>>,
    pub reason: Option<BlockReason>,
    /// Decided without reading the state store
    pub degraded: bool,
}

impl ThrottlingDecision {
    /// Decision taken when the state store could not be read
    pub fn store_unavailable(policy: FailurePolicy, daily_limit: u32) -> Self {
        let can_send = policy == FailurePolicy::FailOpen;
        Self {
            can_send,
            wait_seconds: 0,
            sent_count_today: 0,
            daily_limit,
            last_sent_at: None,
            reason: (!can_send).then_some(BlockReason::StoreUnavailable),
            degraded: true,
        }
    }

    /// Earliest moment the delay rule allows another send
    pub fn next_allowed_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let wait = Duration::seconds(self.wait_seconds.min(i64::MAX as u64 / 1000) as i64);
        now.checked_add_signed(wait).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Decide whether a sender may send at `now`.
///
/// `state` is `None` for a sender that has never sent. The daily limit wins
/// over the delay rule: once it is reached nothing else is considered.
pub fn evaluate_throttling(
    state: Option<&ThrottlingState>,
    daily_limit: u32,
    min_delay: Duration,
    now: DateTime<Utc>,
) -> ThrottlingDecision {
    let sent_count_today = state.map(|s| s.sent_count_today).unwrap_or(0);
    let last_sent_at = state.and_then(|s| s.last_sent_at);

    let mut decision = ThrottlingDecision {
        can_send: true,
        wait_seconds: 0,
        sent_count_today,
        daily_limit,
        last_sent_at,
        reason: None,
        degraded: false,
    };

    if sent_count_today >= daily_limit {
        decision.can_send = false;
        decision.reason = Some(BlockReason::DailyLimitReached);
        return decision;
    }

    if let Some(last) = last_sent_at {
        // A last send stamped in the future counts as "just now".
        let elapsed = (now - last).max(Duration::zero());
        if min_delay > Duration::zero() && elapsed < min_delay {
            decision.can_send = false;
            decision.reason = Some(BlockReason::MinDelayNotElapsed);
            decision.wait_seconds = ceil_seconds(min_delay - elapsed);
        }
    }

    decision
}

fn ceil_seconds(d: Duration) -> u64 {
    let millis = d.num_milliseconds().max(0) as u64;
    (millis + 999) / 1000
}
