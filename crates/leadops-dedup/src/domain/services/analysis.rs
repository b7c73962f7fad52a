//! Duplicate and data-quality analysis
//!
//! One pass over a lead snapshot producing counts, duplicate groups and
//! per-lead issues. No side effects.

use leadops_common::DedupConfig;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::domain::aggregates::Lead;
use crate::domain::services::classification::{Contactability, IssueKind, LeadClassifier};
use crate::domain::services::removal_plan::RemovalPlan;
use crate::domain::value_objects::{AnalysisScope, EntityId};

/// Contact field a duplicate group was detected on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateField {
    Phone,
    Email,
}

impl DuplicateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }
}

/// Leads sharing one normalized identity value.
///
/// `lead_ids` is ordered oldest-created first and always holds at least two
/// ids; `count == lead_ids.len()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub field: DuplicateField,
    pub value: String,
    /// Set when duplicates are resolved per campaign
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<EntityId>,
    pub lead_ids: Vec<EntityId>,
    pub count: usize,
}

impl DuplicateGroup {
    pub fn new(
        field: DuplicateField,
        value: impl Into<String>,
        campaign_id: Option<EntityId>,
        lead_ids: Vec<EntityId>,
    ) -> Self {
        let count = lead_ids.len();
        Self {
            field,
            value: value.into(),
            campaign_id,
            lead_ids,
            count,
        }
    }

    /// The member a removal keeps when nothing else interferes
    pub fn canonical(&self) -> Option<&EntityId> {
        self.lead_ids.first()
    }

    /// Members after the canonical one
    pub fn redundant(&self) -> &[EntityId] {
        self.lead_ids.get(1..).unwrap_or(&[])
    }
}

/// Lead with at least one data-quality issue
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeadIssues {
    pub lead_id: EntityId,
    pub contactability: Contactability,
    pub issues: Vec<IssueKind>,
}

/// Input record skipped as malformed
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvalidRecord {
    /// Position in the input slice
    pub index: usize,
    pub lead_id: EntityId,
    pub reason: String,
}

/// Analysis output
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub scope: AnalysisScope,
    pub total_leads: usize,
    pub valid_phone: usize,
    pub valid_email: usize,
    pub with_both: usize,
    pub phone_only: usize,
    pub email_only: usize,
    pub with_neither: usize,
    pub empty_phone: usize,
    pub invalid_phone_format: usize,
    pub empty_email: usize,
    pub invalid_email_format: usize,
    /// Distinct leads a duplicate removal pass would delete
    pub duplicate_count: usize,
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub lead_issues: Vec<LeadIssues>,
    pub invalid_records: Vec<InvalidRecord>,
}

impl AnalysisReport {
    fn empty(scope: AnalysisScope) -> Self {
        Self {
            scope,
            total_leads: 0,
            valid_phone: 0,
            valid_email: 0,
            with_both: 0,
            phone_only: 0,
            email_only: 0,
            with_neither: 0,
            empty_phone: 0,
            invalid_phone_format: 0,
            empty_email: 0,
            invalid_email_format: 0,
            duplicate_count: 0,
            duplicate_groups: Vec::new(),
            lead_issues: Vec::new(),
            invalid_records: Vec::new(),
        }
    }

    /// Groups for one field, in report order
    pub fn groups_for(&self, field: DuplicateField) -> impl Iterator<Item = &DuplicateGroup> {
        self.duplicate_groups.iter().filter(move |g| g.field == field)
    }

    /// Largest groups first, capped at `limit` (report itself stays complete)
    pub fn top_groups(&self, limit: usize) -> Vec<&DuplicateGroup> {
        let mut groups: Vec<&DuplicateGroup> = self.duplicate_groups.iter().collect();
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups.truncate(limit);
        groups
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicate_groups.is_empty()
    }
}

type GroupKey = (Option<EntityId>, String);

/// First-seen ordered multimap from identity value to lead ids
#[derive(Default)]
struct IdentityIndex {
    slots: HashMap<GroupKey, usize>,
    entries: Vec<(GroupKey, Vec<EntityId>)>,
}

impl IdentityIndex {
    fn insert(&mut self, key: GroupKey, id: EntityId) {
        match self.slots.get(&key) {
            Some(&slot) => self.entries[slot].1.push(id),
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![id]));
            }
        }
    }

    fn into_groups(self, field: DuplicateField) -> impl Iterator<Item = DuplicateGroup> {
        self.entries
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(move |((campaign_id, value), ids)| DuplicateGroup::new(field, value, campaign_id, ids))
    }
}

/// Duplicate and data-quality analyzer
#[derive(Clone, Debug, Default)]
pub struct DuplicateAnalyzer {
    classifier: LeadClassifier,
}

impl DuplicateAnalyzer {
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            classifier: LeadClassifier::new(config),
        }
    }

    pub fn classifier(&self) -> &LeadClassifier {
        &self.classifier
    }

    /// Analyze the leads of `scope` found in `leads`.
    ///
    /// Leads are visited oldest-created first (stable for equal timestamps),
    /// so group order and canonical members follow creation order.
    pub fn analyze(&self, leads: &[Lead], scope: &AnalysisScope) -> AnalysisReport {
        let mut report = AnalysisReport::empty(scope.clone());

        let mut ordered: Vec<(usize, &Lead)> = leads
            .iter()
            .enumerate()
            .filter(|(_, lead)| scope.includes(lead))
            .collect();
        ordered.sort_by_key(|(_, lead)| lead.created_at());

        let mut seen: HashSet<&EntityId> = HashSet::with_capacity(ordered.len());
        let mut phones = IdentityIndex::default();
        let mut emails = IdentityIndex::default();

        for (index, lead) in ordered {
            if lead.id().is_blank() {
                report.invalid_records.push(InvalidRecord {
                    index,
                    lead_id: lead.id().clone(),
                    reason: "lead id is blank".into(),
                });
                continue;
            }
            if !seen.insert(lead.id()) {
                report.invalid_records.push(InvalidRecord {
                    index,
                    lead_id: lead.id().clone(),
                    reason: "lead id appears more than once".into(),
                });
                continue;
            }

            let quality = self.classifier.classify(lead);
            report.total_leads += 1;

            if quality.phone.is_valid() {
                report.valid_phone += 1;
            }
            if quality.email.is_valid() {
                report.valid_email += 1;
            }
            match quality.contactability {
                Contactability::Both => report.with_both += 1,
                Contactability::PhoneOnly => report.phone_only += 1,
                Contactability::EmailOnly => report.email_only += 1,
                Contactability::Neither => report.with_neither += 1,
            }
            for issue in &quality.issues {
                match issue {
                    IssueKind::MissingPhone => report.empty_phone += 1,
                    IssueKind::InvalidPhoneFormat => report.invalid_phone_format += 1,
                    IssueKind::MissingEmail => report.empty_email += 1,
                    IssueKind::InvalidEmailFormat => report.invalid_email_format += 1,
                }
            }

            let partition = scope.partition(lead).cloned();
            if let Some(value) = quality.phone.identity() {
                phones.insert((partition.clone(), value.to_string()), lead.id().clone());
            }
            if let Some(value) = quality.email.identity() {
                emails.insert((partition, value.to_string()), lead.id().clone());
            }

            if !quality.issues.is_empty() {
                report.lead_issues.push(LeadIssues {
                    lead_id: lead.id().clone(),
                    contactability: quality.contactability,
                    issues: quality.issues.into_iter().collect(),
                });
            }
        }

        report.duplicate_groups = phones
            .into_groups(DuplicateField::Phone)
            .chain(emails.into_groups(DuplicateField::Email))
            .collect();
        report.duplicate_count = RemovalPlan::from_groups(&report.duplicate_groups).total_to_remove();

        report
    }
}
