//! Analysis scope
//!
//! Which leads an analysis covers, and whether duplicates are resolved
//! across campaigns or only inside each campaign.

use leadops_common::EntityId;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::Lead;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisScope {
    /// Leads of a single campaign
    Campaign { campaign_id: EntityId },
    /// Every lead of the account
    Account {
        /// Detect duplicates across campaigns; when false, two leads only
        /// collide if they also belong to the same campaign
        cross_campaign: bool,
    },
}

impl AnalysisScope {
    pub fn campaign(campaign_id: impl Into<EntityId>) -> Self {
        Self::Campaign { campaign_id: campaign_id.into() }
    }

    pub fn account() -> Self {
        Self::Account { cross_campaign: true }
    }

    pub fn account_per_campaign() -> Self {
        Self::Account { cross_campaign: false }
    }

    /// Whether the lead belongs to this scope
    pub fn includes(&self, lead: &Lead) -> bool {
        match self {
            Self::Campaign { campaign_id } => lead.campaign_id() == Some(campaign_id),
            Self::Account { .. } => true,
        }
    }

    /// Extra grouping key so duplicates stay inside one campaign
    pub fn partition<'a>(&self, lead: &'a Lead) -> Option<&'a EntityId> {
        match self {
            Self::Account { cross_campaign: false } => lead.campaign_id(),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnalysisScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Campaign { campaign_id } => write!(f, "campaign:{}", campaign_id),
            Self::Account { cross_campaign: true } => write!(f, "account"),
            Self::Account { cross_campaign: false } => write!(f, "account-per-campaign"),
        }
    }
}
