//! In-memory event resolver helpers.
//!
//! Storage-backed lookup and recurrence expansion happen upstream. These
//! helpers take an already resolved list of instances and distribute it into
//! the day buckets and week rows the grid assembler consumes.

use chrono::NaiveDate;

use crate::error::LayoutError;
use crate::models::event::Event;
use crate::models::settings::LayoutSettings;
use crate::models::week::{DayBucket, Week, DAYS_PER_WEEK};
use crate::utils::date::{date_range, get_week_start};

/// Optional category and free-text filters applied before bucketing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub category: Option<String>,
    pub text: Option<String>,
}

impl EventFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Category must match exactly; text is a case-insensitive substring of
    /// the title or category. Blank text matches everything.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(category) = self.category.as_deref() {
            if event.category.as_deref() != Some(category) {
                return false;
            }
        }

        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                event.title.to_lowercase().contains(&needle)
                    || event
                        .category
                        .as_deref()
                        .is_some_and(|category| category.to_lowercase().contains(&needle))
            }
        }
    }
}

/// One bucket per date from `first` for `day_count` days. Each event lands in
/// every day it touches, in input order.
pub fn bucket_events(
    first: NaiveDate,
    day_count: usize,
    events: &[Event],
    filter: &EventFilter,
) -> Vec<DayBucket> {
    let visible: Vec<&Event> = events.iter().filter(|event| filter.matches(event)).collect();

    date_range(first, day_count)
        .map(|date| {
            let day_events = visible
                .iter()
                .filter(|event| event.occurs_on(date))
                .map(|event| (*event).clone())
                .collect();
            DayBucket::new(date, day_events)
        })
        .collect()
}

/// The week row starting at `week_start`, filled from `events`.
pub fn week_from_events(
    week_start: NaiveDate,
    events: &[Event],
    filter: &EventFilter,
) -> Result<Week, LayoutError> {
    Week::new(bucket_events(week_start, DAYS_PER_WEEK, events, filter))
}

fn check_settings(settings: &LayoutSettings) -> Result<(), LayoutError> {
    settings.validate().map_err(LayoutError::InvalidSettings)
}

/// First day of the week row containing `date`.
pub fn week_containing(
    date: NaiveDate,
    settings: &LayoutSettings,
) -> Result<NaiveDate, LayoutError> {
    check_settings(settings)?;
    Ok(get_week_start(date, settings.first_day_of_week))
}

/// Start dates of the week rows shown for a month view.
pub fn month_row_starts(
    year: i32,
    month: u32,
    settings: &LayoutSettings,
) -> Result<Vec<NaiveDate>, LayoutError> {
    let first_of_month =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(LayoutError::InvalidMonth { year, month })?;
    let grid_start = week_containing(first_of_month, settings)?;

    Ok(date_range(grid_start, settings.month_weeks as usize * DAYS_PER_WEEK)
        .step_by(DAYS_PER_WEEK)
        .collect())
}
