//! Throttling State Aggregate
//!
//! Per-sender send counters. The daily reset of `sent_count_today` is owned
//! by whoever maintains the store, not by this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SenderIdentity;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottlingState {
    pub sender: SenderIdentity,
    #[serde(default)]
    pub last_sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sent_count_today: u32,
    pub daily_limit: u32,
}

impl ThrottlingState {
    /// State of a sender that has not sent anything yet
    pub fn fresh(sender: SenderIdentity, daily_limit: u32) -> Self {
        Self {
            sender,
            last_sent_at: None,
            sent_count_today: 0,
            daily_limit,
        }
    }

    pub fn remaining_today(&self) -> u32 {
        self.daily_limit.saturating_sub(self.sent_count_today)
    }

    /// Count a successful send. `last_sent_at` never moves backwards.
    pub fn record_send(&mut self, sent_at: DateTime<Utc>) {
        self.sent_count_today = self.sent_count_today.saturating_add(1);
        self.last_sent_at = Some(match self.last_sent_at {
            Some(previous) => previous.max(sent_at),
            None => sent_at,
        });
    }
}
