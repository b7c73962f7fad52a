//! Duplicate removal planning
//!
//! Decides, per duplicate group, which member survives and which are
//! deleted. Groups are walked in report order. A group keeps its first
//! member that no earlier group has already scheduled for deletion, so an
//! email group overlapping a phone group keeps a different holder instead
//! of losing both. Every group ends with at most one survivor, which is
//! what makes a second pass find nothing. Each lead is scheduled at most
//! once.

use serde::Serialize;
use std::collections::HashSet;

use crate::domain::services::analysis::{DuplicateField, DuplicateGroup};
use crate::domain::value_objects::EntityId;

/// Planned outcome for one duplicate group
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupRemoval {
    pub field: DuplicateField,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<EntityId>,
    pub keep: Option<EntityId>,
    pub remove: Vec<EntityId>,
}

impl GroupRemoval {
    /// `field:value`, prefixed with `campaign/` when resolved per campaign
    pub fn label(&self) -> String {
        match &self.campaign_id {
            Some(campaign) => format!("{}/{}:{}", campaign, self.field.as_str(), self.value),
            None => format!("{}:{}", self.field.as_str(), self.value),
        }
    }
}

/// Removal plan over a list of duplicate groups
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RemovalPlan {
    pub groups: Vec<GroupRemoval>,
}

impl RemovalPlan {
    pub fn from_groups(groups: &[DuplicateGroup]) -> Self {
        let mut scheduled: HashSet<&EntityId> = HashSet::new();
        let mut planned = Vec::with_capacity(groups.len());

        for group in groups {
            let mut members_seen: HashSet<&EntityId> = HashSet::new();
            let survivors: Vec<&EntityId> = group
                .lead_ids
                .iter()
                .filter(|id| !scheduled.contains(id) && members_seen.insert(*id))
                .collect();

            // None when earlier groups already scheduled every member
            let keep = survivors.first().map(|id| (*id).clone());
            let remove: Vec<EntityId> = survivors.iter().skip(1).map(|id| (*id).clone()).collect();
            scheduled.extend(survivors.into_iter().skip(1));

            planned.push(GroupRemoval {
                field: group.field,
                value: group.value.clone(),
                campaign_id: group.campaign_id.clone(),
                keep,
                remove,
            });
        }

        Self { groups: planned }
    }

    pub fn total_to_remove(&self) -> usize {
        self.groups.iter().map(|g| g.remove.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_to_remove() == 0
    }

    /// Every lead id scheduled for deletion, in plan order
    pub fn doomed(&self) -> impl Iterator<Item = &EntityId> {
        self.groups.iter().flat_map(|g| g.remove.iter())
    }
}
