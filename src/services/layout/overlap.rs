//! Overlap stacker for timed events on a single day.
//!
//! Greedy: each event counts the earlier-placed intervals it collides with.
//! Later-starting events therefore stack to the right of earlier ones.

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::utils::date::minutes_from_midnight;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Half-open interval in minutes from midnight of the day being laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInterval {
    pub start: u32,
    pub end: u32,
}

impl DayInterval {
    /// Portion of `event` visible on `date`, clamped to `[0, 1440]`.
    pub fn for_event_on(event: &Event, date: NaiveDate) -> Self {
        let event_end = event.effective_end();

        let start = if event.start.date() < date {
            0
        } else {
            minutes_from_midnight(event.start)
        };
        let end = if event_end.date() > date {
            MINUTES_PER_DAY
        } else {
            minutes_from_midnight(event_end)
        };

        Self {
            start,
            end: end.max(start),
        }
    }

    fn collides_with(&self, placed: &DayInterval) -> bool {
        let contained = placed.start <= self.start && self.end <= placed.end;
        let starts_inside = self.start < placed.end;
        contained || starts_inside
    }
}

/// Overlap count for each interval, in the given (start-ascending) order.
///
/// Entry `k` only ever counts intervals at positions `< k`.
pub fn stack_overlaps(intervals: &[DayInterval]) -> Vec<u32> {
    let mut placed: Vec<DayInterval> = Vec::with_capacity(intervals.len());
    let mut counts = Vec::with_capacity(intervals.len());

    for interval in intervals {
        let count = placed
            .iter()
            .filter(|previous| interval.collides_with(previous))
            .count();
        counts.push(count as u32);
        placed.push(*interval);
    }

    counts
}
