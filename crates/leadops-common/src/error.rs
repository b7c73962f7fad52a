//! Error types for LeadOps

use serde::Serialize;
use thiserror::Error;

/// Error taxonomy shared by both engines.
///
/// Expected conditions are never raised past an engine boundary; they are
/// counted in reports and results under one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed lead or sequence data
    InvalidInput,
    /// Read or write collaborator could not be reached
    StoreUnavailable,
    /// Delete rejected because other data depends on the lead
    ConstraintViolation,
    /// Some batches of a multi-batch operation failed
    PartialBatchFailure,
}

impl ErrorKind {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::StoreUnavailable => "store_unavailable",
            Self::ConstraintViolation => "constraint_violation",
            Self::PartialBatchFailure => "partial_batch_failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the model
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but holds an unusable value
    #[error("invalid config: {0}")]
    Invalid(String),
}
