// Event module
// Resolved event instance consumed by the layout engine

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::date::last_day;

/// Stable identifier, unique within the visible period.
pub type EventId = i64;

/// Layout category an event is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    MultiDay,
    AllDay,
    Simple,
}

/// A resolved, timezone-adjusted event instance.
///
/// `end` is `None` when the resolver could not supply a usable end time.
/// Such events are laid out with zero duration and never span days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use calendar_grid_layout::models::event::Event;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new(1, "Team Meeting", start, end).unwrap();
    /// assert!(!event.is_multi_day());
    /// ```
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, String> {
        Self::builder().id(id).title(title).start(start).end(end).build()
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if let Some(end) = self.end {
            if end < self.start {
                return Err("Event end time cannot be before start time".to_string());
            }
        }

        Ok(())
    }

    /// True when the end time is missing and the event was clamped to zero duration.
    pub fn is_degraded(&self) -> bool {
        self.end.is_none()
    }

    /// End time used for layout; a missing end collapses onto the start.
    pub fn effective_end(&self) -> NaiveDateTime {
        self.end.unwrap_or(self.start).max(self.start)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last calendar day the event is visible on (midnight ends are exclusive).
    pub fn last_day(&self) -> NaiveDate {
        last_day(self.start, self.effective_end())
    }

    /// True when the event touches more than one calendar date.
    pub fn is_multi_day(&self) -> bool {
        !self.is_degraded() && self.first_day() != self.last_day()
    }

    /// Whether `date` lies within `[first_day, last_day]`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.first_day() <= date && date <= self.last_day()
    }

    /// Category derived only from the event itself, so it is identical on every day.
    pub fn category_kind(&self) -> EventCategory {
        if self.is_multi_day() {
            EventCategory::MultiDay
        } else if self.all_day {
            EventCategory::AllDay
        } else {
            EventCategory::Simple
        }
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<EventId>,
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
    category: Option<String>,
    color: Option<String>,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the event title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the start time
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end time
    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set as all-day event
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Set the event category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build the event. A missing end produces a degraded event.
    pub fn build(self) -> Result<Event, String> {
        let id = self.id.ok_or("Event id is required")?;
        let title = self.title.ok_or("Event title is required")?;
        let start = self.start.ok_or("Event start time is required")?;

        let event = Event {
            id,
            title,
            start,
            end: self.end,
            all_day: self.all_day,
            category: self.category,
            color: self.color,
        };

        event.validate()?;
        Ok(event)
    }
}
