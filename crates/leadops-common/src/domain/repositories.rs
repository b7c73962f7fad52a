//! Repositories - Persistence abstraction shared by the engines
//!
//! The engines never talk to a database directly. Every outbound port
//! (lead store, throttling-state store) reports failures with
//! [`RepositoryError`], which the engines classify through
//! [`RepositoryError::kind`] to decide between skip, retry-per-item,
//! fail-open and hard failure.

use crate::error::ErrorKind;

/// Repository result type
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Entity does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Rejected because other data depends on the entity
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Store was reached but the query failed
    #[error("query error: {0}")]
    Query(String),
}

impl RepositoryError {
    /// Classify into the engine error taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            Self::NotFound(_) => ErrorKind::InvalidInput,
            Self::Unavailable(_) | Self::Query(_) => ErrorKind::StoreUnavailable,
        }
    }

    /// True for referential-constraint rejections
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            RepositoryError::ConstraintViolation("fk".into()).kind(),
            ErrorKind::ConstraintViolation
        );
        assert_eq!(
            RepositoryError::Unavailable("timeout".into()).kind(),
            ErrorKind::StoreUnavailable
        );
        assert_eq!(RepositoryError::Query("bad".into()).kind(), ErrorKind::StoreUnavailable);
        assert_eq!(RepositoryError::NotFound("x".into()).kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_display() {
        let err = RepositoryError::ConstraintViolation("lead has call history".into());
        assert_eq!(err.to_string(), "constraint violation: lead has call history");
        assert!(err.is_constraint_violation());
    }
}
