//! Time-of-day bucketer used for client-side filtering.

use std::collections::BTreeSet;

use chrono::Timelike;

use crate::models::event::Event;
use crate::models::layout::TimeOfDay;
use crate::utils::date::calendar_day_difference;

/// Timed buckets in precedence order.
const TIMED_BUCKETS: [TimeOfDay; 4] = [
    TimeOfDay::Morning,
    TimeOfDay::Afternoon,
    TimeOfDay::Evening,
    TimeOfDay::Night,
];

fn contains_hour(bucket: TimeOfDay, hour: u32) -> bool {
    match bucket {
        TimeOfDay::Morning => (6..=11).contains(&hour),
        TimeOfDay::Afternoon => (12..=17).contains(&hour),
        TimeOfDay::Evening => (18..=23).contains(&hour),
        // wraps past midnight
        TimeOfDay::Night => hour >= 21 || hour <= 5,
        TimeOfDay::AllDay => false,
    }
}

/// Buckets an event belongs to.
///
/// All-day events only ever map to [`TimeOfDay::AllDay`]. Zero-duration events
/// map to the first bucket containing their start hour.
pub fn time_buckets(event: &Event) -> BTreeSet<TimeOfDay> {
    if event.all_day {
        return BTreeSet::from([TimeOfDay::AllDay]);
    }

    let start = event.start;
    let end = event.effective_end();
    let start_hour = start.hour();

    if start == end {
        return TIMED_BUCKETS
            .iter()
            .find(|bucket| contains_hour(**bucket, start_hour))
            .map(|bucket| BTreeSet::from([*bucket]))
            .unwrap_or_default();
    }

    let hours = covered_hours(
        start_hour,
        end.hour(),
        calendar_day_difference(start.date(), end.date()),
    );

    TIMED_BUCKETS
        .iter()
        .copied()
        .filter(|bucket| hours.iter().any(|hour| contains_hour(*bucket, *hour)))
        .collect()
}

/// Inclusive integer hours touched between `start_hour` and `end_hour`,
/// wrapping through midnight when the interval crosses dates.
fn covered_hours(start_hour: u32, end_hour: u32, day_difference: i64) -> Vec<u32> {
    match day_difference {
        0 => (start_hour..=end_hour).collect(),
        1 if end_hour < start_hour => (start_hour..24).chain(0..=end_hour).collect(),
        _ => (0..24).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use test_case::test_case;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn timed(start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::new(1, "event", start, end).unwrap()
    }

    fn set(buckets: &[TimeOfDay]) -> BTreeSet<TimeOfDay> {
        buckets.iter().copied().collect()
    }

    #[test]
    fn test_all_day_maps_only_to_all_day() {
        let event = Event::builder()
            .id(1)
            .title("Holiday")
            .start(at(16, 0, 0))
            .end(at(16, 0, 0))
            .all_day(true)
            .build()
            .unwrap();

        assert_eq!(time_buckets(&event), set(&[TimeOfDay::AllDay]));
    }

    #[test_case(9, 10 => vec![TimeOfDay::Morning]; "morning meeting")]
    #[test_case(11, 13 => vec![TimeOfDay::Morning, TimeOfDay::Afternoon]; "lunch crosses noon")]
    #[test_case(19, 20 => vec![TimeOfDay::Evening]; "early evening")]
    #[test_case(20, 22 => vec![TimeOfDay::Evening, TimeOfDay::Night]; "late evening is also night")]
    #[test_case(2, 4 => vec![TimeOfDay::Night]; "small hours")]
    #[test_case(5, 6 => vec![TimeOfDay::Morning, TimeOfDay::Night]; "dawn")]
    fn test_same_day_buckets(start_hour: u32, end_hour: u32) -> Vec<TimeOfDay> {
        let event = timed(at(15, start_hour, 0), at(15, end_hour, 30));
        time_buckets(&event).into_iter().collect()
    }

    #[test]
    fn test_crossing_midnight_wraps() {
        let event = timed(at(15, 22, 0), at(16, 1, 0));
        assert_eq!(
            time_buckets(&event),
            set(&[TimeOfDay::Evening, TimeOfDay::Night])
        );
    }

    #[test]
    fn test_long_event_covers_everything() {
        let event = timed(at(15, 10, 0), at(17, 9, 0));
        assert_eq!(
            time_buckets(&event),
            set(&[
                TimeOfDay::Morning,
                TimeOfDay::Afternoon,
                TimeOfDay::Evening,
                TimeOfDay::Night
            ])
        );
    }

    #[test_case(3 => TimeOfDay::Night; "night hour")]
    #[test_case(8 => TimeOfDay::Morning; "morning hour")]
    #[test_case(22 => TimeOfDay::Evening; "evening wins over night")]
    fn test_zero_duration_single_bucket(hour: u32) -> TimeOfDay {
        let event = timed(at(15, hour, 15), at(15, hour, 15));
        let buckets = time_buckets(&event);
        assert_eq!(buckets.len(), 1);
        buckets.into_iter().next().unwrap()
    }

    #[test]
    fn test_degraded_event_uses_start_hour() {
        let event = Event::builder()
            .id(1)
            .title("No end")
            .start(at(15, 14, 0))
            .build()
            .unwrap();
        assert_eq!(time_buckets(&event), set(&[TimeOfDay::Afternoon]));
    }
}
