//! Email Value Object
//!
//! Normalized email address used as a duplicate-identity key.

use leadops_common::EmailCaseFolding;
use thiserror::Error;

/// Email address that passed the structural check, case-folded
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

/// Rejected email value, carrying its normalized form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid email format: {0:?}")]
pub struct EmailError(String);

impl EmailError {
    pub fn into_normalized(self) -> String {
        self.0
    }
}

impl EmailAddress {
    pub fn parse(raw: &str, folding: EmailCaseFolding) -> Result<Self, EmailError> {
        let normalized = Self::normalize(raw, folding);
        if is_well_formed(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(EmailError(normalized))
        }
    }

    /// Identity form of a raw value under the given case-folding policy
    pub fn normalize(raw: &str, folding: EmailCaseFolding) -> String {
        let trimmed = raw.trim();
        match folding {
            EmailCaseFolding::Lowercase => trimmed.to_lowercase(),
            EmailCaseFolding::DomainOnly => match trimmed.rsplit_once('@') {
                Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
                None => trimmed.to_string(),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// `local@domain.tld`: exactly one `@`, non-empty local part, a dotted
/// domain that neither starts nor ends with a dot, no whitespace
fn is_well_formed(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWER: EmailCaseFolding = EmailCaseFolding::Lowercase;

    #[test]
    fn test_lowercase_folding() {
        let email = EmailAddress::parse("  Jane.Doe@EXAMPLE.com ", LOWER).unwrap();
        assert_eq!(email.as_str(), "jane.doe@example.com");
    }

    #[test]
    fn test_domain_only_folding() {
        let email = EmailAddress::parse("Jane.Doe@EXAMPLE.com", EmailCaseFolding::DomainOnly).unwrap();
        assert_eq!(email.into_inner(), "Jane.Doe@example.com");
    }

    #[test]
    fn test_invalid_formats() {
        for raw in ["invalid", "test@", "@example.com", "a@b@c.com", "a@example", "a@.com", "a@com.", "a b@x.com"] {
            assert!(EmailAddress::parse(raw, LOWER).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_rejected_value_keeps_identity_form() {
        let err = EmailAddress::parse(" Not-An-Email ", LOWER).unwrap_err();
        assert_eq!(err.into_normalized(), "not-an-email");
    }
}
