// Test fixtures - reusable test data
// Provides consistent events and week rows across all test files

#![allow(dead_code)]

use calendar_grid_layout::models::event::{Event, EventId};
use calendar_grid_layout::models::settings::LayoutSettings;
use calendar_grid_layout::models::week::Week;
use calendar_grid_layout::services::resolver::{week_from_events, EventFilter};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Monday, Jan 13 2025
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
}

/// Date `offset` days after [`monday`]
pub fn day(offset: i64) -> NaiveDate {
    monday() + Duration::days(offset)
}

pub fn at(offset: i64, hour: u32, minute: u32) -> NaiveDateTime {
    day(offset).and_hms_opt(hour, minute, 0).unwrap()
}

pub fn timed(id: EventId, start: NaiveDateTime, end: NaiveDateTime) -> Event {
    Event::new(id, format!("event {}", id), start, end).unwrap()
}

/// All-day event stored as midnight to next midnight
pub fn all_day(id: EventId, offset: i64) -> Event {
    Event::builder()
        .id(id)
        .title(format!("all day {}", id))
        .start(at(offset, 0, 0))
        .end(at(offset + 1, 0, 0))
        .all_day(true)
        .build()
        .unwrap()
}

/// Multi-day bar from the morning of `first` to the evening of `last`
pub fn spanning(id: EventId, first: i64, last: i64) -> Event {
    timed(id, at(first, 9, 0), at(last, 17, 0))
}

/// Settings with Monday week start and strict reconciliation
pub fn monday_settings() -> LayoutSettings {
    LayoutSettings {
        first_day_of_week: 1,
        month_weeks: 6,
        strict_reconciliation: true,
    }
}

/// Week row starting `week_offset` weeks after [`monday`]
pub fn week_of(week_offset: i64, events: &[Event]) -> Week {
    week_from_events(day(week_offset * 7), events, &EventFilter::default()).unwrap()
}
