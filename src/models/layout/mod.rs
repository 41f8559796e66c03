// Layout module
// Renderer-agnostic output of a layout pass

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::event::{EventCategory, EventId};

/// Visual weight of a vacated track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacerWeight {
    /// Vacated by a single-day (all-day) event; occupies a full-width slot.
    Full,
    /// Vacated by a multi-day bar; drawn with the bar end-cap style.
    Small,
}

/// Placeholder for a track left empty by the event that owned it yesterday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spacer {
    pub weight: SpacerWeight,
    pub vacated_by: EventId,
}

impl Spacer {
    pub fn vacated_by(category: EventCategory, event_id: EventId) -> Self {
        let weight = match category {
            EventCategory::MultiDay => SpacerWeight::Small,
            EventCategory::AllDay | EventCategory::Simple => SpacerWeight::Full,
        };
        Self {
            weight,
            vacated_by: event_id,
        }
    }
}

/// One position in a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackSlot {
    MultiDay(EventId),
    AllDay(EventId),
    Simple(EventId),
    Spacer(Spacer),
}

impl TrackSlot {
    pub fn for_event(category: EventCategory, id: EventId) -> Self {
        match category {
            EventCategory::MultiDay => TrackSlot::MultiDay(id),
            EventCategory::AllDay => TrackSlot::AllDay(id),
            EventCategory::Simple => TrackSlot::Simple(id),
        }
    }

    pub fn event_id(&self) -> Option<EventId> {
        match *self {
            TrackSlot::MultiDay(id) | TrackSlot::AllDay(id) | TrackSlot::Simple(id) => Some(id),
            TrackSlot::Spacer(_) => None,
        }
    }

    pub fn category(&self) -> Option<EventCategory> {
        match self {
            TrackSlot::MultiDay(_) => Some(EventCategory::MultiDay),
            TrackSlot::AllDay(_) => Some(EventCategory::AllDay),
            TrackSlot::Simple(_) => Some(EventCategory::Simple),
            TrackSlot::Spacer(_) => None,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, TrackSlot::Spacer(_))
    }
}

/// Geometry of a multi-day bar within one week row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Number of day-columns covered, 1..=7
    pub width: u8,
    /// The event continues past the last column of this row
    pub overflows_week: bool,
    /// The event started before the first column of this row
    pub starts_before_week: bool,
}

/// Coarse time-of-day filter bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    AllDay,
    Morning,
    Afternoon,
    Evening,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneKind {
    /// Multi-day and all-day bars
    Banner,
    /// Hour-grid events
    Timed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Event,
    Spacer,
}

/// A single renderable cell of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub lane: LaneKind,
    pub slot_index: usize,
    pub kind: CellKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_buckets: Vec<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_minute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_minute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacer: Option<Spacer>,
}

impl Cell {
    pub fn event(
        lane: LaneKind,
        slot_index: usize,
        event_id: EventId,
        category: EventCategory,
    ) -> Self {
        Self {
            lane,
            slot_index,
            kind: CellKind::Event,
            event_id: Some(event_id),
            category: Some(category),
            span: None,
            overlap_count: None,
            time_buckets: Vec::new(),
            start_minute: None,
            end_minute: None,
            spacer: None,
        }
    }

    pub fn spacer(slot_index: usize, spacer: Spacer) -> Self {
        Self {
            lane: LaneKind::Banner,
            slot_index,
            kind: CellKind::Spacer,
            event_id: None,
            category: None,
            span: None,
            overlap_count: None,
            time_buckets: Vec::new(),
            start_minute: None,
            end_minute: None,
            spacer: Some(spacer),
        }
    }
}

/// Event ids per category, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lanes {
    pub multi_day: Vec<EventId>,
    pub all_day: Vec<EventId>,
    pub simple: Vec<EventId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The event had no usable end and was clamped to zero duration
    DegradedEvent,
    /// The event was supplied for a day outside its own date range and skipped
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub event_id: EventId,
    pub date: NaiveDate,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub lanes: Lanes,
    /// Reconciled banner lane, index = track
    pub tracks: Vec<TrackSlot>,
    pub cells: Vec<Cell>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl DayLayout {
    /// Banner track index of an event on this day.
    pub fn track_of(&self, event_id: EventId) -> Option<usize> {
        self.tracks
            .iter()
            .position(|slot| slot.event_id() == Some(event_id))
    }

    pub fn cell_for(&self, event_id: EventId) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.event_id == Some(event_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekLayout {
    pub first_date: NaiveDate,
    pub days: Vec<DayLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<WeekLayout>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacer_weight_follows_vacating_category() {
        assert_eq!(
            Spacer::vacated_by(EventCategory::MultiDay, 4).weight,
            SpacerWeight::Small
        );
        assert_eq!(
            Spacer::vacated_by(EventCategory::AllDay, 4).weight,
            SpacerWeight::Full
        );
    }

    #[test]
    fn test_track_slot_accessors() {
        let slot = TrackSlot::for_event(EventCategory::AllDay, 9);
        assert_eq!(slot, TrackSlot::AllDay(9));
        assert_eq!(slot.event_id(), Some(9));
        assert!(!slot.is_spacer());

        let spacer = TrackSlot::Spacer(Spacer::vacated_by(EventCategory::AllDay, 9));
        assert_eq!(spacer.event_id(), None);
        assert_eq!(spacer.category(), None);
    }

    #[test]
    fn test_cell_serialization_omits_empty_fields() {
        let cell = Cell::spacer(1, Spacer::vacated_by(EventCategory::MultiDay, 3));
        let json = serde_json::to_value(&cell).unwrap();

        assert_eq!(json["kind"], "spacer");
        assert_eq!(json["lane"], "banner");
        assert_eq!(json["spacer"]["weight"], "small");
        assert_eq!(json["spacer"]["vacated_by"], 3);
        assert!(json.get("event_id").is_none());
        assert!(json.get("time_buckets").is_none());
    }
}
