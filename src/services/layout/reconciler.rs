//! Track reconciler for the banner (multi-day + all-day) lane.
//!
//! Walks a week left to right. An event that was on track `N` yesterday stays
//! on track `N` today; vacated tracks above it are held open with spacers
//! instead of letting it move up.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::error::LayoutError;
use crate::models::event::EventId;
use crate::models::layout::{Spacer, TrackSlot};

/// How today's banner population relates to yesterday's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No banner events today; carry-over state dropped
    Cleared,
    /// Nothing continues from yesterday (or there was no yesterday); raw order
    Fresh,
    /// Some events continue and some arrived or left
    Changed,
    /// Same population as yesterday, possibly reordered
    Unchanged,
}

/// Per-week reconciliation state.
///
/// Owned by a single week pass and dropped with it; never shared between
/// weeks, so independent weeks can be laid out in any order or in parallel.
#[derive(Debug, Clone, Default)]
pub struct ReconcileContext {
    previous: Option<Vec<TrackSlot>>,
}

impl ReconcileContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Yesterday's tracks, or `None` when there is no carry-over.
    pub fn previous(&self) -> Option<&[TrackSlot]> {
        self.previous.as_deref()
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Assign today's banner refs (multi-day first, then all-day) to tracks.
    ///
    /// Fails only on contract violations: a duplicate id or a non-banner slot
    /// in `current`. The context is left untouched in that case.
    pub fn reconcile(
        &mut self,
        date: NaiveDate,
        current: &[TrackSlot],
    ) -> Result<Vec<TrackSlot>, LayoutError> {
        validate_refs(date, current)?;

        let (transition, tracks) = match self.previous.as_deref() {
            _ if current.is_empty() => (Transition::Cleared, Vec::new()),
            None => (Transition::Fresh, current.to_vec()),
            Some(previous) => {
                let continuing = continuing_positions(previous, current);
                let transition = classify_transition(previous, current, &continuing);
                let tracks = match transition {
                    Transition::Fresh => current.to_vec(),
                    _ => fill_with_spacers(previous, current, &continuing),
                };
                (transition, tracks)
            }
        };

        log::trace!("{}: banner transition {:?} -> {} tracks", date, transition, tracks.len());

        self.previous = match transition {
            Transition::Cleared => None,
            _ => Some(tracks.clone()),
        };

        Ok(tracks)
    }
}

/// Reconcile a whole week of banner refs with a fresh context.
pub fn reconcile_week(
    days: &[(NaiveDate, Vec<TrackSlot>)],
) -> Result<Vec<Vec<TrackSlot>>, LayoutError> {
    let mut context = ReconcileContext::new();
    days.iter()
        .map(|(date, refs)| context.reconcile(*date, refs))
        .collect()
}

fn validate_refs(date: NaiveDate, current: &[TrackSlot]) -> Result<(), LayoutError> {
    let mut seen = HashSet::with_capacity(current.len());

    for slot in current {
        let id = match slot {
            TrackSlot::MultiDay(id) | TrackSlot::AllDay(id) => *id,
            other => {
                return Err(LayoutError::ReconcileContract {
                    date,
                    reason: format!("{:?} is not a banner event", other),
                })
            }
        };

        if !seen.insert(id) {
            return Err(LayoutError::ReconcileContract {
                date,
                reason: format!("event {} listed twice", id),
            });
        }
    }

    Ok(())
}

/// Yesterday's track index for every event present on both days.
fn continuing_positions(
    previous: &[TrackSlot],
    current: &[TrackSlot],
) -> HashMap<EventId, usize> {
    let yesterday: HashMap<EventId, usize> = previous
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| slot.event_id().map(|id| (id, index)))
        .collect();

    current
        .iter()
        .filter_map(|slot| slot.event_id())
        .filter_map(|id| yesterday.get(&id).map(|index| (id, *index)))
        .collect()
}

/// Arrivals are checked first; with none, departures are checked instead, so
/// an event leaving also forces reconciliation.
fn classify_transition(
    previous: &[TrackSlot],
    current: &[TrackSlot],
    continuing: &HashMap<EventId, usize>,
) -> Transition {
    if continuing.is_empty() {
        return Transition::Fresh;
    }

    let today: HashSet<EventId> = current.iter().filter_map(|slot| slot.event_id()).collect();
    let yesterday: HashSet<EventId> = previous.iter().filter_map(|slot| slot.event_id()).collect();

    let mut diff = today.difference(&yesterday).count();
    if diff == 0 {
        diff = yesterday.difference(&today).count();
    }

    if diff > 0 {
        Transition::Changed
    } else {
        Transition::Unchanged
    }
}

/// Spacer describing whatever held `index` yesterday.
fn vacated_spacer(previous: &[TrackSlot], index: usize) -> Option<Spacer> {
    match previous.get(index)? {
        TrackSlot::Spacer(spacer) => Some(*spacer),
        slot => {
            let id = slot.event_id()?;
            let category = slot.category()?;
            Some(Spacer::vacated_by(category, id))
        }
    }
}

fn fill_with_spacers(
    previous: &[TrackSlot],
    current: &[TrackSlot],
    continuing: &HashMap<EventId, usize>,
) -> Vec<TrackSlot> {
    let reserved: HashSet<usize> = continuing.values().copied().collect();
    let mut slots: Vec<Option<TrackSlot>> = Vec::with_capacity(previous.len().max(current.len()));

    let is_free = |slots: &Vec<Option<TrackSlot>>, index: usize| {
        !reserved.contains(&index) && slots.get(index).map_or(true, Option::is_none)
    };

    for (raw_position, slot) in current.iter().enumerate() {
        let resolved = slot.event_id().and_then(|id| continuing.get(&id).copied());

        let index = match resolved {
            Some(resolved) => {
                for gap in raw_position..resolved {
                    if is_free(&slots, gap) {
                        let spacer = vacated_spacer(previous, gap).map(TrackSlot::Spacer);
                        place(&mut slots, gap, spacer);
                    }
                }
                resolved
            }
            None => (0..).find(|index| is_free(&slots, *index)).unwrap_or(slots.len()),
        };

        place(&mut slots, index, Some(*slot));
    }

    // keep slots vacated by a real event since yesterday; inherited trailing spacers drop off
    let tail_end = (slots.len()..previous.len())
        .filter(|index| !previous[*index].is_spacer())
        .last()
        .map(|index| index + 1);
    if let Some(tail_end) = tail_end {
        slots.resize(tail_end, None);
    }

    slots
        .into_iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            slot.or_else(|| vacated_spacer(previous, index).map(TrackSlot::Spacer))
        })
        .collect()
}

fn place(slots: &mut Vec<Option<TrackSlot>>, index: usize, value: Option<TrackSlot>) {
    if slots.len() <= index {
        slots.resize(index + 1, None);
    }
    slots[index] = value;
}
