// Date utility functions
// Calendar-day arithmetic shared by the layout services

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// Last calendar day touched by an interval.
///
/// An end of exactly midnight is exclusive, so `Thu 00:00 -> Fri 00:00`
/// occupies Thursday only. Zero-length intervals stay on their start day.
pub fn last_day(start: NaiveDateTime, end: NaiveDateTime) -> NaiveDate {
    if end <= start {
        return start.date();
    }
    if end.time() == NaiveTime::MIN {
        return (end - Duration::days(1)).date();
    }
    end.date()
}

/// Whole calendar days between two dates (negative when `to` is earlier).
pub fn calendar_day_difference(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Minutes elapsed since midnight of the value's own date.
pub fn minutes_from_midnight(value: NaiveDateTime) -> u32 {
    value.hour() * 60 + value.minute()
}

/// Iterate `count` consecutive dates starting at `first`.
pub fn date_range(first: NaiveDate, count: usize) -> impl Iterator<Item = NaiveDate> {
    (0..count as i64).map(move |offset| first + Duration::days(offset))
}
