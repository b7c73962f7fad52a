//! Send-time computation

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::aggregates::Sequence;
use crate::domain::value_objects::ChannelType;

fn add(base: DateTime<Utc>, d: Duration) -> DateTime<Utc> {
    base.checked_add_signed(d).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// When to dispatch a step whose predecessor went out at `base`.
///
/// The step's own cadence (`base + wait`) is honoured, but a step after the
/// first never goes out before `base + throttling_floor`. Step 1 has no
/// floor.
pub fn calculate_optimal_send_time(
    base: DateTime<Utc>,
    step_number: u32,
    wait: Duration,
    throttling_floor: Duration,
) -> DateTime<Utc> {
    let cadence = add(base, wait);
    if step_number <= 1 {
        return cadence;
    }
    cadence.max(add(base, throttling_floor))
}

/// Dispatch time of one step for one lead
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub step_number: u32,
    pub channel_type: ChannelType,
    pub send_at: DateTime<Utc>,
}

/// Dispatch times of every step of `sequence` for a lead enrolled at
/// `enrolled_at`. Each step is timed from the previous step's send time;
/// the throttling floor only applies to email steps.
pub fn plan_sequence(
    enrolled_at: DateTime<Utc>,
    sequence: &Sequence,
    throttling_floor: Duration,
) -> Vec<PlannedStep> {
    let mut base = enrolled_at;
    sequence
        .steps()
        .iter()
        .map(|step| {
            let floor = if step.is_email() { throttling_floor } else { Duration::zero() };
            let send_at = calculate_optimal_send_time(base, step.step_number, step.wait(), floor);
            base = send_at;
            PlannedStep {
                step_number: step.step_number,
                channel_type: step.channel_type,
                send_at,
            }
        })
        .collect()
}
