//! Grid assembler: folds the per-day classifier, span, overlap and track
//! results of one week into the renderer-facing layout.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::classifier::{classify, ClassifiedDay};
use super::overlap::{stack_overlaps, DayInterval};
use super::reconciler::ReconcileContext;
use super::span::span_in_week;
use super::time_of_day::time_buckets;
use crate::error::LayoutError;
use crate::models::event::{Event, EventCategory, EventId};
use crate::models::layout::{
    Cell, DayLayout, Diagnostic, DiagnosticKind, LaneKind, MonthLayout, TrackSlot, WeekLayout,
};
use crate::models::settings::LayoutSettings;
use crate::models::week::{DayBucket, Week};
use crate::services::resolver::{month_row_starts, week_from_events, EventFilter};

/// Builds week and month layouts.
///
/// Holds only configuration. Reconciliation state lives in a context created
/// per week row, so one assembler can lay out any number of independent weeks.
#[derive(Debug, Clone, Default)]
pub struct GridAssembler {
    settings: LayoutSettings,
}

impl GridAssembler {
    pub fn new(settings: LayoutSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Lay out one week row.
    pub fn layout_week(&self, week: &Week) -> Result<WeekLayout, LayoutError> {
        let mut context = ReconcileContext::new();
        let mut days = Vec::with_capacity(week.days().len());

        for bucket in week.days() {
            days.push(self.layout_day(bucket, week.first_date(), &mut context)?);
        }

        log::debug!(
            "Laid out week {} to {}: {} banner tracks max, {} diagnostics",
            week.first_date(),
            week.last_date(),
            days.iter().map(|day| day.tracks.len()).max().unwrap_or(0),
            days.iter().map(|day| day.diagnostics.len()).sum::<usize>()
        );

        Ok(WeekLayout {
            first_date: week.first_date(),
            days,
        })
    }

    /// Lay out the week row starting at `week_start` from a flat event list.
    pub fn layout_week_from_events(
        &self,
        week_start: NaiveDate,
        events: &[Event],
        filter: &EventFilter,
    ) -> Result<WeekLayout, LayoutError> {
        let week = week_from_events(week_start, events, filter)?;
        self.layout_week(&week)
    }

    /// Lay out every row of a month view. Each row starts with no carry-over.
    pub fn layout_month(
        &self,
        year: i32,
        month: u32,
        events: &[Event],
        filter: &EventFilter,
    ) -> Result<MonthLayout, LayoutError> {
        let weeks = month_row_starts(year, month, &self.settings)?
            .into_iter()
            .map(|row_start| self.layout_week_from_events(row_start, events, filter))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MonthLayout { year, month, weeks })
    }

    fn layout_day(
        &self,
        bucket: &DayBucket,
        week_start: NaiveDate,
        context: &mut ReconcileContext,
    ) -> Result<DayLayout, LayoutError> {
        let date = bucket.date;
        let (events, diagnostics) = screen_bucket(bucket);
        let classified = classify(events);

        let refs = classified.banner_refs();
        let tracks = match context.reconcile(date, &refs) {
            Ok(tracks) => tracks,
            Err(err) if !self.settings.strict_reconciliation => {
                log::warn!("{}; falling back to raw order", err);
                context.reset();
                refs
            }
            Err(err) => return Err(err),
        };

        let categories = category_index(&classified);
        validate_lane_composition(date, &tracks, &categories)?;

        let mut cells = banner_cells(&tracks, &classified, week_start, date)?;
        cells.extend(timed_cells(&classified, date));

        Ok(DayLayout {
            date,
            lanes: classified.lanes(),
            tracks,
            cells,
            diagnostics,
        })
    }
}

/// Drop events the resolver placed on a day outside their own range and flag
/// events that were clamped for a missing end.
fn screen_bucket(bucket: &DayBucket) -> (Vec<&Event>, Vec<Diagnostic>) {
    let mut kept = Vec::with_capacity(bucket.events.len());
    let mut diagnostics = Vec::new();

    for event in &bucket.events {
        if !event.occurs_on(bucket.date) {
            log::warn!(
                "Event {} ({} - {}) supplied for {}; skipping",
                event.id,
                event.first_day(),
                event.last_day(),
                bucket.date
            );
            diagnostics.push(Diagnostic {
                event_id: event.id,
                date: bucket.date,
                kind: DiagnosticKind::OutOfRange,
            });
            continue;
        }

        if event.is_degraded() {
            log::warn!("Event {} has no end time; laid out with zero duration", event.id);
            diagnostics.push(Diagnostic {
                event_id: event.id,
                date: bucket.date,
                kind: DiagnosticKind::DegradedEvent,
            });
        }

        kept.push(event);
    }

    (kept, diagnostics)
}

fn category_index<'a>(classified: &ClassifiedDay<'a>) -> HashMap<EventId, &'a Event> {
    classified
        .multi_day
        .iter()
        .chain(&classified.all_day)
        .chain(&classified.simple)
        .map(|event| (event.id, *event))
        .collect()
}

/// Every event slot in the banner lane must carry the category the
/// classifier assigned to that id, and simple events never appear there.
fn validate_lane_composition(
    date: NaiveDate,
    tracks: &[TrackSlot],
    events: &HashMap<EventId, &Event>,
) -> Result<(), LayoutError> {
    for slot in tracks {
        let (Some(event_id), Some(found)) = (slot.event_id(), slot.category()) else {
            continue;
        };
        let expected = events
            .get(&event_id)
            .map(|event| event.category_kind())
            .unwrap_or(EventCategory::Simple);

        if found != expected || found == EventCategory::Simple {
            return Err(LayoutError::LaneMismatch {
                date,
                event_id,
                expected,
                found,
            });
        }
    }
    Ok(())
}

fn banner_cells(
    tracks: &[TrackSlot],
    classified: &ClassifiedDay<'_>,
    week_start: NaiveDate,
    date: NaiveDate,
) -> Result<Vec<Cell>, LayoutError> {
    let events = category_index(classified);
    let mut cells = Vec::with_capacity(tracks.len());

    for (slot_index, slot) in tracks.iter().enumerate() {
        let (event_id, category) = match (slot, slot.event_id(), slot.category()) {
            (TrackSlot::Spacer(spacer), _, _) => {
                cells.push(Cell::spacer(slot_index, *spacer));
                continue;
            }
            (_, Some(event_id), Some(category)) => (event_id, category),
            _ => continue,
        };

        let mut cell = Cell::event(LaneKind::Banner, slot_index, event_id, category);

        if let Some(event) = events.get(&event_id) {
            cell.time_buckets = time_buckets(event).into_iter().collect();

            // the bar is described once, on the first column it is drawn in
            let bar_start = event.first_day().max(week_start);
            if category == EventCategory::MultiDay && bar_start == date {
                cell.span = Some(span_in_week(event.first_day(), event.last_day(), week_start)?);
            }
        }

        cells.push(cell);
    }

    Ok(cells)
}

fn timed_cells(classified: &ClassifiedDay<'_>, date: NaiveDate) -> Vec<Cell> {
    let intervals: Vec<DayInterval> = classified
        .simple
        .iter()
        .map(|event| DayInterval::for_event_on(event, date))
        .collect();
    let overlaps = stack_overlaps(&intervals);

    classified
        .simple
        .iter()
        .zip(intervals.iter().zip(overlaps))
        .enumerate()
        .map(|(slot_index, (event, (interval, overlap_count)))| {
            let mut cell =
                Cell::event(LaneKind::Timed, slot_index, event.id, EventCategory::Simple);
            cell.overlap_count = Some(overlap_count);
            cell.start_minute = Some(interval.start);
            cell.end_minute = Some(interval.end);
            cell.time_buckets = time_buckets(event).into_iter().collect();
            cell
        })
        .collect()
}
