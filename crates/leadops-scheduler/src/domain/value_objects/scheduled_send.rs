//! A send slotted for a lead

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSend {
    pub lead_id: EntityId,
    pub scheduled_at: DateTime<Utc>,
}

impl ScheduledSend {
    pub fn new(lead_id: impl Into<EntityId>, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            lead_id: lead_id.into(),
            scheduled_at,
        }
    }
}
