//! Contact field status
//!
//! Result of normalizing one raw contact field (phone or email).

use serde::{Deserialize, Serialize};

/// Presence and validity of a contact field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "normalized", rename_all = "snake_case")]
pub enum FieldStatus {
    /// Null, empty, whitespace or a placeholder
    Missing,
    /// Present but fails format validation
    Invalid(String),
    /// Present and well-formed
    Valid(String),
}

impl FieldStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Normalized value usable as an identity key (present and non-empty)
    pub fn identity(&self) -> Option<&str> {
        match self {
            Self::Valid(v) | Self::Invalid(v) if !v.is_empty() => Some(v.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(FieldStatus::Missing.identity(), None);
        assert_eq!(FieldStatus::Invalid(String::new()).identity(), None);
        assert_eq!(FieldStatus::Invalid("123".into()).identity(), Some("123"));
        assert_eq!(FieldStatus::Valid("5551234567".into()).identity(), Some("5551234567"));
    }
}
