//! Event classifier: partitions one day's events into draw lanes.

use crate::models::event::{Event, EventCategory};
use crate::models::layout::{Lanes, TrackSlot};

/// A day's events split by category, each list in draw order.
#[derive(Debug, Default)]
pub struct ClassifiedDay<'a> {
    pub multi_day: Vec<&'a Event>,
    pub all_day: Vec<&'a Event>,
    pub simple: Vec<&'a Event>,
}

impl<'a> ClassifiedDay<'a> {
    /// Banner lane input for the track reconciler: multi-day bars first, then all-day.
    pub fn banner_refs(&self) -> Vec<TrackSlot> {
        self.multi_day
            .iter()
            .chain(&self.all_day)
            .map(|event| TrackSlot::for_event(event.category_kind(), event.id))
            .collect()
    }

    pub fn lanes(&self) -> Lanes {
        Lanes {
            multi_day: self.multi_day.iter().map(|event| event.id).collect(),
            all_day: self.all_day.iter().map(|event| event.id).collect(),
            simple: self.simple.iter().map(|event| event.id).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.multi_day.len() + self.all_day.len() + self.simple.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `events` into multi-day, all-day and simple lanes.
///
/// The category depends only on the event, never on the day being classified.
/// Every lane is ordered by start time; `sort_by_key` is stable, so equal
/// starts keep the order the resolver supplied them in.
pub fn classify<'a, I>(events: I) -> ClassifiedDay<'a>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut day = ClassifiedDay::default();

    for event in events {
        match event.category_kind() {
            EventCategory::MultiDay => day.multi_day.push(event),
            EventCategory::AllDay => day.all_day.push(event),
            EventCategory::Simple => day.simple.push(event),
        }
    }

    day.multi_day.sort_by_key(|event| event.start);
    day.all_day.sort_by_key(|event| event.start);
    day.simple.sort_by_key(|event| event.start);

    day
}
