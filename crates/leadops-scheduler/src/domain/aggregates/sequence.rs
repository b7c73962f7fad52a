//! Sequence Aggregate
//!
//! Ordered outreach steps of a campaign. Step numbers run 1..=n without
//! gaps; each step waits `wait_seconds` after the previous one.

use chrono::Duration;
use leadops_common::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::ChannelType;

/// Longest wait a single step may declare (one year)
pub const MAX_WAIT_SECONDS: u64 = 366 * 24 * 60 * 60;

/// One timed action in a sequence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachStep {
    pub step_number: u32,
    pub channel_type: ChannelType,
    #[serde(default)]
    pub wait_seconds: u64,
}

impl OutreachStep {
    pub fn new(step_number: u32, channel_type: ChannelType, wait_seconds: u64) -> Self {
        Self {
            step_number,
            channel_type,
            wait_seconds,
        }
    }

    pub fn is_email(&self) -> bool {
        self.channel_type.is_email()
    }

    /// Wait as a duration, capped at [`MAX_WAIT_SECONDS`]
    pub fn wait(&self) -> Duration {
        Duration::seconds(self.wait_seconds.min(MAX_WAIT_SECONDS) as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("sequence has no steps")]
    Empty,

    #[error("step numbers must be contiguous from 1: expected {expected}, found {found}")]
    NonContiguous { expected: u32, found: u32 },

    #[error("step {step_number} waits {wait_seconds}s, longer than a year")]
    WaitOutOfRange { step_number: u32, wait_seconds: u64 },
}

impl SequenceError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// Validated step sequence, ordered by step number
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sequence {
    steps: Vec<OutreachStep>,
}

impl Sequence {
    /// Build a sequence from steps in any order
    pub fn new(mut steps: Vec<OutreachStep>) -> Result<Self, SequenceError> {
        if steps.is_empty() {
            return Err(SequenceError::Empty);
        }

        steps.sort_by_key(|s| s.step_number);
        for (expected, step) in (1u32..).zip(&steps) {
            if step.step_number != expected {
                return Err(SequenceError::NonContiguous {
                    expected,
                    found: step.step_number,
                });
            }
            if step.wait_seconds > MAX_WAIT_SECONDS {
                return Err(SequenceError::WaitOutOfRange {
                    step_number: step.step_number,
                    wait_seconds: step.wait_seconds,
                });
            }
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[OutreachStep] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(n: u32, channel: ChannelType, wait: u64) -> OutreachStep {
        OutreachStep::new(n, channel, wait)
    }

    #[test]
    fn test_sequence_orders_steps() {
        let sequence = Sequence::new(vec![
            step(3, ChannelType::Email, 600),
            step(1, ChannelType::Voice, 0),
            step(2, ChannelType::Sms, 60),
        ])
        .unwrap();

        let numbers: Vec<u32> = sequence.steps().iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_gap_rejected() {
        let err = Sequence::new(vec![step(1, ChannelType::Voice, 0), step(3, ChannelType::Email, 60)])
            .unwrap_err();

        assert_eq!(err, SequenceError::NonContiguous { expected: 2, found: 3 });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_duplicate_and_zero_rejected() {
        assert!(Sequence::new(vec![step(1, ChannelType::Voice, 0), step(1, ChannelType::Sms, 0)]).is_err());
        assert!(Sequence::new(vec![step(0, ChannelType::Voice, 0)]).is_err());
        assert_eq!(Sequence::new(vec![]).unwrap_err(), SequenceError::Empty);
    }

    #[test]
    fn test_wait_out_of_range() {
        let err = Sequence::new(vec![step(1, ChannelType::Email, MAX_WAIT_SECONDS + 1)]).unwrap_err();
        assert!(matches!(err, SequenceError::WaitOutOfRange { step_number: 1, .. }));
    }

    #[test]
    fn test_step_deserializes_without_wait() {
        let step: OutreachStep =
            serde_json::from_str(r#"{"step_number": 1, "channel_type": "whatsapp"}"#).unwrap();
        assert_eq!(step.channel_type, ChannelType::WhatsApp);
        assert_eq!(step.wait_seconds, 0);
    }
}
