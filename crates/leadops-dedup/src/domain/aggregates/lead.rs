//! Lead Aggregate
//!
//! A prospect contact record as handed over by the lead store. Leads are
//! immutable input to the engine: it classifies them and, under an explicit
//! remediation operation, asks the store to delete them. It never edits one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::EntityId;

/// Lead aggregate root
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    id: EntityId,
    #[serde(default)]
    campaign_id: Option<EntityId>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    created_at: DateTime<Utc>,
}

impl Lead {
    /// Create a lead with no contact data
    pub fn new(id: impl Into<EntityId>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            campaign_id: None,
            phone: None,
            email: None,
            created_at,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn in_campaign(mut self, campaign_id: impl Into<EntityId>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn campaign_id(&self) -> Option<&EntityId> { self.campaign_id.as_ref() }
    pub fn phone(&self) -> Option<&str> { self.phone.as_deref() }
    pub fn email(&self) -> Option<&str> { self.email.as_deref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_builder() {
        let now = Utc::now();
        let lead = Lead::new("lead-1", now)
            .with_phone("555-123-4567")
            .with_email("jane@example.com")
            .in_campaign("camp-1");

        assert_eq!(lead.id().as_str(), "lead-1");
        assert_eq!(lead.phone(), Some("555-123-4567"));
        assert_eq!(lead.email(), Some("jane@example.com"));
        assert_eq!(lead.campaign_id().map(|c| c.as_str()), Some("camp-1"));
        assert_eq!(lead.created_at(), now);
    }

    #[test]
    fn test_deserialize_with_nulls() {
        let lead: Lead = serde_json::from_str(
            r#"{"id":"l1","phone":null,"email":"EMPTY","created_at":"2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(lead.phone(), None);
        assert_eq!(lead.email(), Some("EMPTY"));
        assert_eq!(lead.campaign_id(), None);
    }
}
