//! Send spacing

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_objects::ScheduledSend;

/// Space a sender's sends at least `min_delay` apart.
///
/// Sends are sorted by time (ties keep their input order) and walked once;
/// any send closer than `min_delay` to its predecessor is pushed to exactly
/// `predecessor + min_delay`. Times only ever move later. The result is in
/// sorted order.
pub fn distribute_email_timing(mut sends: Vec<ScheduledSend>, min_delay: Duration) -> Vec<ScheduledSend> {
    sends.sort_by_key(|s| s.scheduled_at);

    if min_delay <= Duration::zero() {
        return sends;
    }

    for i in 1..sends.len() {
        let earliest = sends[i - 1]
            .scheduled_at
            .checked_add_signed(min_delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if sends[i].scheduled_at < earliest {
            sends[i].scheduled_at = earliest;
        }
    }

    sends
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap() + Duration::minutes(minute)
    }

    fn ids(sends: &[ScheduledSend]) -> Vec<&str> {
        sends.iter().map(|s| s.lead_id.as_str()).collect()
    }

    #[test]
    fn test_identical_times_are_spaced() {
        let out = distribute_email_timing(
            vec![ScheduledSend::new("a", t(0)), ScheduledSend::new("b", t(0))],
            Duration::minutes(5),
        );

        assert_eq!(out[0].scheduled_at, t(0));
        assert_eq!(out[1].scheduled_at, t(5));
        assert_eq!(ids(&out), vec!["a", "b"]);
    }

    #[test]
    fn test_pushes_cascade_forward() {
        let out = distribute_email_timing(
            vec![
                ScheduledSend::new("c", t(6)),
                ScheduledSend::new("a", t(0)),
                ScheduledSend::new("b", t(2)),
                ScheduledSend::new("d", t(30)),
            ],
            Duration::minutes(5),
        );

        assert_eq!(ids(&out), vec!["a", "b", "c", "d"]);
        let times: Vec<_> = out.iter().map(|s| s.scheduled_at).collect();
        assert_eq!(times, vec![t(0), t(5), t(10), t(30)]);
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(distribute_email_timing(vec![], Duration::minutes(5)).is_empty());

        let single = distribute_email_timing(vec![ScheduledSend::new("a", t(3))], Duration::minutes(5));
        assert_eq!(single, vec![ScheduledSend::new("a", t(3))]);
    }

    #[test]
    fn test_zero_delay_only_sorts() {
        let out = distribute_email_timing(
            vec![ScheduledSend::new("b", t(1)), ScheduledSend::new("a", t(1))],
            Duration::zero(),
        );
        assert_eq!(ids(&out), vec!["b", "a"]);
        assert!(out.iter().all(|s| s.scheduled_at == t(1)));
    }
}
