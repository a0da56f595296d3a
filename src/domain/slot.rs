//! Slot generation: the ordered sequence of bookable time windows for a
//! store on a given date.
//!
//! Pure and side-effect free: callers pass in the weekday schedule and the
//! set of already-booked start times, and the result is recomputed fresh on
//! every call so it always reflects the latest bookings at read time.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::schedule::Schedule;

/// A bookable time window derived from a [`Schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Start of the window, minute granularity.
    pub start_time: NaiveTime,
    /// End of the window, minute granularity.
    pub end_time: NaiveTime,
    /// 1-based absolute index of the window within the day, derived from
    /// wall-clock position rather than emission count. Serial numbers stay
    /// stable as bookings remove windows; taken positions leave gaps.
    pub serial_no: u32,
}

/// Truncates a time to minute granularity, dropping seconds and below.
#[must_use]
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Computes the ordered sequence of bookable windows for `date`.
///
/// Walks from `open_time` in steps of the schedule's slot duration while
/// the window still ends at or before `close_time` (a window ending exactly
/// at close is offered). Windows whose minute-truncated start appears in
/// `booked` are skipped without renumbering. A closed schedule or one with
/// missing times yields an empty sequence, not an error.
#[must_use]
pub fn generate_available_slots(
    schedule: &Schedule,
    date: NaiveDate,
    booked: &HashSet<NaiveTime>,
) -> Vec<Slot> {
    if !schedule.is_open {
        return Vec::new();
    }
    let (Some(open), Some(close)) = (schedule.open_time, schedule.close_time) else {
        return Vec::new();
    };

    let duration = schedule.slot_duration_minutes();
    let step = Duration::minutes(i64::from(duration));
    let end = date.and_time(close);

    let mut slots = Vec::new();
    let mut current = date.and_time(open);
    // Steps are uniform, so the absolute serial equals the step index + 1.
    let mut serial_no: u32 = 1;

    while current + step <= end {
        let start_time = truncate_to_minute(current.time());
        let end_time = truncate_to_minute((current + step).time());

        if !booked.contains(&start_time) {
            slots.push(Slot {
                start_time,
                end_time,
                serial_no,
            });
        }

        serial_no += 1;
        current += step;
    }

    slots
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::BookingError;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default()
    }

    fn open_schedule(open: NaiveTime, close: NaiveTime, per_hour: u32) -> Schedule {
        match Schedule::new(0, true, Some(open), Some(close), per_hour) {
            Ok(s) => s,
            Err(BookingError::InvalidSchedule(msg)) => panic!("invalid schedule: {msg}"),
            Err(_) => panic!("unexpected error"),
        }
    }

    #[test]
    fn two_hour_day_with_half_hour_slots() {
        let schedule = open_schedule(t(9, 0), t(11, 0), 2);
        let slots = generate_available_slots(&schedule, d(2025, 6, 2), &HashSet::new());

        let expected = [
            (t(9, 0), t(9, 30), 1),
            (t(9, 30), t(10, 0), 2),
            (t(10, 0), t(10, 30), 3),
            (t(10, 30), t(11, 0), 4),
        ];
        assert_eq!(slots.len(), expected.len());
        for (slot, (start, end, serial)) in slots.iter().zip(expected.iter()) {
            assert_eq!(slot.start_time, *start);
            assert_eq!(slot.end_time, *end);
            assert_eq!(slot.serial_no, *serial);
        }
    }

    #[test]
    fn booked_slot_is_skipped_without_renumbering() {
        let schedule = open_schedule(t(9, 0), t(11, 0), 2);
        let booked: HashSet<NaiveTime> = [t(9, 30)].into_iter().collect();
        let slots = generate_available_slots(&schedule, d(2025, 6, 2), &booked);

        let serials: Vec<u32> = slots.iter().map(|s| s.serial_no).collect();
        let starts: Vec<NaiveTime> = slots.iter().map(|s| s.start_time).collect();
        assert_eq!(serials, vec![1, 3, 4]);
        assert_eq!(starts, vec![t(9, 0), t(10, 0), t(10, 30)]);
    }

    #[test]
    fn closed_day_yields_empty() {
        let Ok(schedule) = Schedule::new(0, false, Some(t(9, 0)), Some(t(17, 0)), 2) else {
            panic!("valid schedule");
        };
        let slots = generate_available_slots(&schedule, d(2025, 6, 2), &HashSet::new());
        assert!(slots.is_empty());
    }

    #[test]
    fn slot_never_extends_past_close() {
        // 09:00-10:45 with 30-minute slots: the 10:30-11:00 window would
        // overrun close, so only three slots are offered.
        let schedule = open_schedule(t(9, 0), t(10, 45), 2);
        let slots = generate_available_slots(&schedule, d(2025, 6, 2), &HashSet::new());
        assert_eq!(slots.len(), 3);
        for slot in &slots {
            assert!(slot.end_time <= t(10, 45));
        }
    }

    #[test]
    fn slot_ending_exactly_at_close_is_offered() {
        let schedule = open_schedule(t(9, 0), t(9, 30), 2);
        let slots = generate_available_slots(&schedule, d(2025, 6, 2), &HashSet::new());
        assert_eq!(slots.len(), 1);
        assert_eq!(slots.first().map(|s| s.end_time), Some(t(9, 30)));
    }

    #[test]
    fn every_slot_spans_the_configured_duration() {
        let schedule = open_schedule(t(8, 0), t(18, 0), 4);
        let slots = generate_available_slots(&schedule, d(2025, 6, 2), &HashSet::new());
        assert!(!slots.is_empty());
        for slot in &slots {
            let span = slot.end_time - slot.start_time;
            assert_eq!(span, Duration::minutes(15));
        }
    }

    #[test]
    fn output_is_sorted_and_start_times_unique() {
        let schedule = open_schedule(t(9, 0), t(17, 0), 3);
        let slots = generate_available_slots(&schedule, d(2025, 6, 2), &HashSet::new());
        let mut seen = HashSet::new();
        let mut previous: Option<NaiveTime> = None;
        for slot in &slots {
            assert!(seen.insert(slot.start_time));
            if let Some(prev) = previous {
                assert!(prev < slot.start_time);
            }
            previous = Some(slot.start_time);
        }
    }

    #[test]
    fn generation_is_idempotent() {
        let schedule = open_schedule(t(9, 0), t(12, 0), 2);
        let booked: HashSet<NaiveTime> = [t(10, 0)].into_iter().collect();
        let first = generate_available_slots(&schedule, d(2025, 6, 2), &booked);
        let second = generate_available_slots(&schedule, d(2025, 6, 2), &booked);
        assert_eq!(first, second);
    }

    #[test]
    fn fully_booked_day_yields_empty() {
        let schedule = open_schedule(t(9, 0), t(10, 0), 2);
        let booked: HashSet<NaiveTime> = [t(9, 0), t(9, 30)].into_iter().collect();
        let slots = generate_available_slots(&schedule, d(2025, 6, 2), &booked);
        assert!(slots.is_empty());
    }

    #[test]
    fn truncate_drops_seconds() {
        let Some(with_seconds) = NaiveTime::from_hms_opt(9, 15, 42) else {
            panic!("valid time");
        };
        assert_eq!(truncate_to_minute(with_seconds), t(9, 15));
    }
}
