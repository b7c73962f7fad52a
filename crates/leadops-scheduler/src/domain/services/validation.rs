//! Sequence timing validation
//!
//! Advisory only: warnings are shown to whoever edits the sequence and never
//! block saving it.

use leadops_common::SequenceRulesConfig;
use serde::Serialize;
use std::fmt;

use crate::domain::aggregates::OutreachStep;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimingWarning {
    /// Email step after step 1 that waits less than the configured minimum
    EmailStepTooSoon {
        step_number: u32,
        wait_seconds: u64,
        minimum_seconds: u64,
    },
    /// Two consecutive email steps closer together than the configured gap
    ConsecutiveEmailsTooClose {
        first_step: u32,
        second_step: u32,
        gap_seconds: u64,
        minimum_seconds: u64,
    },
}

impl TimingWarning {
    /// Step the warning should be shown on
    pub fn step_number(&self) -> u32 {
        match self {
            Self::EmailStepTooSoon { step_number, .. } => *step_number,
            Self::ConsecutiveEmailsTooClose { second_step, .. } => *second_step,
        }
    }
}

impl fmt::Display for TimingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmailStepTooSoon { step_number, wait_seconds, minimum_seconds } => write!(
                f,
                "step {}: email sent {}s after the previous step, recommended at least {}s",
                step_number, wait_seconds, minimum_seconds
            ),
            Self::ConsecutiveEmailsTooClose { first_step, second_step, gap_seconds, minimum_seconds } => write!(
                f,
                "steps {} and {}: emails {}s apart, recommended at least {}s",
                first_step, second_step, gap_seconds, minimum_seconds
            ),
        }
    }
}

/// Check a sequence's timing against deliverability rules.
///
/// Steps are evaluated in step-number order whatever order they arrive in.
/// The gap between two consecutive email steps is the sum of the waits of
/// every step after the first email, up to and including the second.
pub fn validate_sequence_timing(steps: &[OutreachStep], rules: &SequenceRulesConfig) -> Vec<TimingWarning> {
    let mut ordered: Vec<&OutreachStep> = steps.iter().collect();
    ordered.sort_by_key(|s| s.step_number);

    let mut warnings = Vec::new();
    // (step number, seconds accumulated since it)
    let mut previous_email: Option<(u32, u64)> = None;

    for step in ordered {
        if let Some((_, gap)) = previous_email.as_mut() {
            *gap = gap.saturating_add(step.wait_seconds);
        }
        if !step.is_email() {
            continue;
        }

        if step.step_number > 1 && step.wait_seconds < rules.min_email_wait_seconds {
            warnings.push(TimingWarning::EmailStepTooSoon {
                step_number: step.step_number,
                wait_seconds: step.wait_seconds,
                minimum_seconds: rules.min_email_wait_seconds,
            });
        }

        if let Some((first_step, gap)) = previous_email {
            if gap < rules.min_consecutive_email_gap_seconds {
                warnings.push(TimingWarning::ConsecutiveEmailsTooClose {
                    first_step,
                    second_step: step.step_number,
                    gap_seconds: gap,
                    minimum_seconds: rules.min_consecutive_email_gap_seconds,
                });
            }
        }

        previous_email = Some((step.step_number, 0));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ChannelType;

    fn step(n: u32, channel: ChannelType, wait: u64) -> OutreachStep {
        OutreachStep::new(n, channel, wait)
    }

    #[test]
    fn test_well_spaced_sequence_is_clean() {
        let steps = vec![
            step(1, ChannelType::Email, 0),
            step(2, ChannelType::Voice, 3600),
            step(3, ChannelType::Email, 86_400),
        ];
        assert!(validate_sequence_timing(&steps, &SequenceRulesConfig::default()).is_empty());
    }

    #[test]
    fn test_first_step_email_is_exempt() {
        let steps = vec![step(1, ChannelType::Email, 0)];
        assert!(validate_sequence_timing(&steps, &SequenceRulesConfig::default()).is_empty());
    }

    #[test]
    fn test_email_step_too_soon() {
        let steps = vec![step(1, ChannelType::Sms, 0), step(2, ChannelType::Email, 120)];

        let warnings = validate_sequence_timing(&steps, &SequenceRulesConfig::default());

        assert_eq!(
            warnings,
            vec![TimingWarning::EmailStepTooSoon {
                step_number: 2,
                wait_seconds: 120,
                minimum_seconds: 300,
            }]
        );
        assert_eq!(warnings[0].step_number(), 2);
    }

    #[test]
    fn test_consecutive_emails_sum_intermediate_waits() {
        // 1 email, 2 sms +200s, 3 email +350s: gap 550s < 600s
        let steps = vec![
            step(3, ChannelType::Email, 350),
            step(1, ChannelType::Email, 0),
            step(2, ChannelType::Sms, 200),
        ];

        let warnings = validate_sequence_timing(&steps, &SequenceRulesConfig::default());

        assert_eq!(
            warnings,
            vec![TimingWarning::ConsecutiveEmailsTooClose {
                first_step: 1,
                second_step: 3,
                gap_seconds: 550,
                minimum_seconds: 600,
            }]
        );
    }

    #[test]
    fn test_both_warnings_on_one_step() {
        let steps = vec![step(1, ChannelType::Email, 0), step(2, ChannelType::Email, 60)];

        let warnings = validate_sequence_timing(&steps, &SequenceRulesConfig::default());

        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.step_number() == 2));
        assert!(warnings[1].to_string().contains("60s apart"));
    }

    #[test]
    fn test_custom_rules() {
        let rules = SequenceRulesConfig {
            min_email_wait_seconds: 0,
            min_consecutive_email_gap_seconds: 0,
        };
        let steps = vec![step(1, ChannelType::Email, 0), step(2, ChannelType::Email, 0)];
        assert!(validate_sequence_timing(&steps, &rules).is_empty());
    }
}
