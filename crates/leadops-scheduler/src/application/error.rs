//! Scheduler errors

use leadops_common::{ErrorKind, RepositoryError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("throttling state store error: {0}")]
    Store(#[source] RepositoryError),
}

impl SchedulerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(e) => e.kind(),
        }
    }
}
