//! Engine configuration
//!
//! All sections are optional in the TOML file; anything omitted takes the
//! default below.
//!
//! ```toml
//! [dedup]
//! placeholders = ["EMPTY", "NULL"]
//! delete_batch_size = 250
//! email_case = "domain_only"
//!
//! [throttling]
//! min_delay_minutes = 10
//! failure_policy = "fail_closed"
//!
//! [throttling.daily_limits]
//! email = 40
//!
//! [sequence]
//! min_email_wait_seconds = 300
//! min_consecutive_email_gap_seconds = 600
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadOpsConfig {
    /// Deduplication & data-quality engine
    pub dedup: DedupConfig,
    /// Throttling and send spacing
    pub throttling: ThrottlingConfig,
    /// Sequence-timing validator thresholds
    pub sequence: SequenceRulesConfig,
}

impl LeadOpsConfig {
    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading config");
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engines cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dedup.delete_batch_size == 0 {
            return Err(ConfigError::Invalid("dedup.delete_batch_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// How email addresses are case-folded before identity comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailCaseFolding {
    /// Fold the whole address to lowercase
    #[default]
    Lowercase,
    /// Fold only the domain, keep the local part as written
    DomainOnly,
}

/// Deduplication settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Literal values upstream exports use for "no value" (case-insensitive)
    pub placeholders: Vec<String>,
    /// Max lead ids per delete call
    pub delete_batch_size: usize,
    /// Email case-folding policy
    pub email_case: EmailCaseFolding,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            placeholders: ["EMPTY", "NULL", "NONE", "N/A"].iter().map(|s| s.to_string()).collect(),
            delete_batch_size: 100,
            email_case: EmailCaseFolding::Lowercase,
        }
    }
}

/// What a throttling check does when the state store is unreachable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Permit the send
    #[default]
    FailOpen,
    /// Block the send
    FailClosed,
}

/// Throttling settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottlingConfig {
    /// Minimum spacing between two sends from one sender
    pub min_delay_minutes: u32,
    /// Behavior when throttling state cannot be read
    pub failure_policy: FailurePolicy,
    /// Default per-sender daily limits by channel
    pub daily_limits: ChannelLimits,
}

impl Default for ThrottlingConfig {
    fn default() -> Self {
        Self {
            min_delay_minutes: 5,
            failure_policy: FailurePolicy::FailOpen,
            daily_limits: ChannelLimits::default(),
        }
    }
}

/// Per-channel daily send limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelLimits {
    /// Outbound calls per day
    pub voice: u32,
    /// SMS per day
    pub sms: u32,
    /// WhatsApp messages per day
    pub whatsapp: u32,
    /// Emails per day
    pub email: u32,
}

impl Default for ChannelLimits {
    fn default() -> Self {
        Self {
            voice: 200,
            sms: 500,
            whatsapp: 250,
            email: 100,
        }
    }
}

/// Sequence-timing validator thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceRulesConfig {
    /// Minimum wait before any email step after the first step
    pub min_email_wait_seconds: u64,
    /// Minimum combined wait between two consecutive email steps
    pub min_consecutive_email_gap_seconds: u64,
}

impl Default for SequenceRulesConfig {
    fn default() -> Self {
        Self {
            min_email_wait_seconds: 300,
            min_consecutive_email_gap_seconds: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LeadOpsConfig::default();
        assert_eq!(config.dedup.delete_batch_size, 100);
        assert_eq!(config.dedup.email_case, EmailCaseFolding::Lowercase);
        assert!(config.dedup.placeholders.iter().any(|p| p == "EMPTY"));
        assert_eq!(config.throttling.min_delay_minutes, 5);
        assert_eq!(config.throttling.failure_policy, FailurePolicy::FailOpen);
        assert_eq!(config.sequence.min_email_wait_seconds, 300);
        assert_eq!(config.sequence.min_consecutive_email_gap_seconds, 600);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = LeadOpsConfig::from_toml_str("").unwrap();
        assert_eq!(config, LeadOpsConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = LeadOpsConfig::from_toml_str(
            r#"
            [dedup]
            email_case = "domain_only"

            [throttling]
            failure_policy = "fail_closed"

            [throttling.daily_limits]
            email = 40
            "#,
        )
        .unwrap();

        assert_eq!(config.dedup.email_case, EmailCaseFolding::DomainOnly);
        assert_eq!(config.dedup.delete_batch_size, 100);
        assert_eq!(config.throttling.failure_policy, FailurePolicy::FailClosed);
        assert_eq!(config.throttling.daily_limits.email, 40);
        assert_eq!(config.throttling.daily_limits.sms, 500);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = LeadOpsConfig::from_toml_str("[dedup]\ndelete_batch_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = LeadOpsConfig::from_toml_str("[dedup\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[throttling]\nmin_delay_minutes = 15").unwrap();

        let config = LeadOpsConfig::load(file.path()).unwrap();
        assert_eq!(config.throttling.min_delay_minutes, 15);
    }

    #[test]
    fn test_load_missing_file() {
        let err = LeadOpsConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
