//! Phone Value Object
//!
//! Normalized phone number used as a duplicate-identity key.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Optional leading `+`, then 10 to 15 digits
fn e164ish() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern compiles"))
}

/// Phone number that passed validation, in normalized form
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

/// Rejected phone value. Carries the normalized form, which still serves
/// as a duplicate-identity key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid phone number format: {0:?}")]
pub struct PhoneError(String);

impl PhoneError {
    pub fn into_normalized(self) -> String {
        self.0
    }
}

impl PhoneNumber {
    /// Normalize and validate a raw phone value
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let normalized = Self::normalize(raw);
        if e164ish().is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(PhoneError(normalized))
        }
    }

    /// Identity form of a raw value: whitespace, parentheses, dashes and
    /// dots removed. Applied to valid and invalid values alike so that
    /// formatting differences never split a duplicate group.
    pub fn normalize(raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '-' | '.'))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(raw: &str) -> String {
        PhoneNumber::parse(raw).unwrap_err().into_normalized()
    }

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(PhoneNumber::normalize("  555-123-4567  "), "5551234567");
        assert_eq!(PhoneNumber::normalize("(555) 123.4567"), "5551234567");
        assert_eq!(PhoneNumber::normalize("+1 555 123 4567"), "+15551234567");
    }

    #[test]
    fn test_valid_numbers() {
        assert_eq!(PhoneNumber::parse("+1 (555) 123-4567").unwrap().as_str(), "+15551234567");
        assert!(PhoneNumber::parse("5551234567").is_ok());
        assert!(PhoneNumber::parse("+442071838750").is_ok());
        assert!(PhoneNumber::parse("123456789012345").is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(rejected("555-123-456"), "555123456");
        assert_eq!(rejected("1234567890123456"), "1234567890123456");
    }

    #[test]
    fn test_rejects_letters_and_inner_plus() {
        assert_eq!(rejected("555-CALL-NOW"), "555CALLNOW");
        assert_eq!(rejected("555+1234567"), "555+1234567");
    }

    #[test]
    fn test_formatting_only_value() {
        assert_eq!(rejected("  () - "), "");
    }
}
