//! Application errors
//!
//! Only conditions that prevent an operation from starting are returned as
//! `Err`. Anything that goes wrong mid-remediation is counted in the
//! [`RemovalResult`](super::RemovalResult) instead.

use leadops_common::{ErrorKind, RepositoryError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DedupError {
    #[error("failed to fetch leads: {0}")]
    Fetch(#[source] RepositoryError),
}

impl DedupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(e) => e.kind(),
        }
    }
}
