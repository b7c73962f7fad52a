//! Lead classification
//!
//! Applies the normalization rules to a lead's phone and email and derives
//! its contactability bucket and data-quality issues.

use leadops_common::{DedupConfig, EmailCaseFolding};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::aggregates::Lead;
use crate::domain::value_objects::{EmailAddress, FieldStatus, PhoneNumber};

/// Data-quality issue attached to a lead
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingPhone,
    InvalidPhoneFormat,
    MissingEmail,
    InvalidEmailFormat,
}

/// Which channels a lead can be reached on, derived from validity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contactability {
    Both,
    PhoneOnly,
    EmailOnly,
    Neither,
}

impl Contactability {
    fn from_validity(phone: bool, email: bool) -> Self {
        match (phone, email) {
            (true, true) => Self::Both,
            (true, false) => Self::PhoneOnly,
            (false, true) => Self::EmailOnly,
            (false, false) => Self::Neither,
        }
    }
}

/// Derived, never-stored view of one lead
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeadQuality {
    pub phone: FieldStatus,
    pub email: FieldStatus,
    pub contactability: Contactability,
    pub issues: BTreeSet<IssueKind>,
}

/// Stateless classifier built from the dedup configuration
#[derive(Clone, Debug)]
pub struct LeadClassifier {
    placeholders: Vec<String>,
    email_case: EmailCaseFolding,
}

impl LeadClassifier {
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            placeholders: config.placeholders.iter().map(|p| p.trim().to_uppercase()).collect(),
            email_case: config.email_case,
        }
    }

    /// Placeholder match is case-insensitive on the trimmed value
    pub fn is_placeholder(&self, value: &str) -> bool {
        let value = value.trim().to_uppercase();
        self.placeholders.iter().any(|p| *p == value)
    }

    fn present<'a>(&self, raw: Option<&'a str>) -> Option<&'a str> {
        raw.map(str::trim)
            .filter(|v| !v.is_empty() && !self.is_placeholder(v))
    }

    pub fn phone_status(&self, raw: Option<&str>) -> FieldStatus {
        match self.present(raw) {
            None => FieldStatus::Missing,
            Some(value) => match PhoneNumber::parse(value) {
                Ok(phone) => FieldStatus::Valid(phone.into_inner()),
                Err(e) => FieldStatus::Invalid(e.into_normalized()),
            },
        }
    }

    pub fn email_status(&self, raw: Option<&str>) -> FieldStatus {
        match self.present(raw) {
            None => FieldStatus::Missing,
            Some(value) => match EmailAddress::parse(value, self.email_case) {
                Ok(email) => FieldStatus::Valid(email.into_inner()),
                Err(e) => FieldStatus::Invalid(e.into_normalized()),
            },
        }
    }

    pub fn classify(&self, lead: &Lead) -> LeadQuality {
        let phone = self.phone_status(lead.phone());
        let email = self.email_status(lead.email());

        let mut issues = BTreeSet::new();
        match phone {
            FieldStatus::Missing => { issues.insert(IssueKind::MissingPhone); }
            FieldStatus::Invalid(_) => { issues.insert(IssueKind::InvalidPhoneFormat); }
            FieldStatus::Valid(_) => {}
        }
        match email {
            FieldStatus::Missing => { issues.insert(IssueKind::MissingEmail); }
            FieldStatus::Invalid(_) => { issues.insert(IssueKind::InvalidEmailFormat); }
            FieldStatus::Valid(_) => {}
        }

        LeadQuality {
            contactability: Contactability::from_validity(phone.is_valid(), email.is_valid()),
            phone,
            email,
            issues,
        }
    }
}

impl Default for LeadClassifier {
    fn default() -> Self {
        Self::new(&DedupConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn lead(phone: Option<&str>, email: Option<&str>) -> Lead {
        let mut lead = Lead::new("l1", Utc::now());
        if let Some(p) = phone {
            lead = lead.with_phone(p);
        }
        if let Some(e) = email {
            lead = lead.with_email(e);
        }
        lead
    }

    #[test]
    fn test_missing_values_are_not_invalid() {
        let classifier = LeadClassifier::default();
        for raw in [None, Some(""), Some("   "), Some("EMPTY"), Some("null"), Some("N/A")] {
            assert_eq!(classifier.phone_status(raw), FieldStatus::Missing, "{raw:?}");
            assert_eq!(classifier.email_status(raw), FieldStatus::Missing, "{raw:?}");
        }
    }

    #[test]
    fn test_valid_both() {
        let quality = LeadClassifier::default()
            .classify(&lead(Some("(555) 123-4567"), Some("Jane@Example.com")));

        assert_eq!(quality.contactability, Contactability::Both);
        assert!(quality.issues.is_empty());
        assert_eq!(quality.phone, FieldStatus::Valid("5551234567".into()));
        assert_eq!(quality.email, FieldStatus::Valid("jane@example.com".into()));
    }

    #[test]
    fn test_multiple_issues() {
        let quality = LeadClassifier::default().classify(&lead(Some("12345"), Some("not-an-email")));

        assert_eq!(quality.contactability, Contactability::Neither);
        assert_eq!(
            quality.issues.iter().copied().collect::<Vec<_>>(),
            vec![IssueKind::InvalidPhoneFormat, IssueKind::InvalidEmailFormat]
        );
    }

    #[test]
    fn test_phone_only_and_email_only() {
        let classifier = LeadClassifier::default();

        let phone_only = classifier.classify(&lead(Some("+447700900123"), None));
        assert_eq!(phone_only.contactability, Contactability::PhoneOnly);
        assert!(phone_only.issues.contains(&IssueKind::MissingEmail));

        let email_only = classifier.classify(&lead(Some("EMPTY"), Some("a@b.io")));
        assert_eq!(email_only.contactability, Contactability::EmailOnly);
        assert!(email_only.issues.contains(&IssueKind::MissingPhone));
    }

    #[test]
    fn test_domain_only_keeps_local_case() {
        let config = DedupConfig {
            email_case: EmailCaseFolding::DomainOnly,
            ..DedupConfig::default()
        };
        let classifier = LeadClassifier::new(&config);

        assert_eq!(classifier.email_status(Some("Jane@X.COM")), FieldStatus::Valid("Jane@x.com".into()));
        assert_eq!(classifier.email_status(Some("Jane@X")), FieldStatus::Invalid("Jane@x".into()));
    }

    #[test]
    fn test_custom_placeholders() {
        let config = DedupConfig {
            placeholders: vec!["unknown".into()],
            ..DedupConfig::default()
        };
        let classifier = LeadClassifier::new(&config);

        assert_eq!(classifier.phone_status(Some("UNKNOWN")), FieldStatus::Missing);
        assert!(classifier.phone_status(Some("EMPTY")).is_invalid());
    }
}
