// Property-based tests for the layout engine
// Random event populations must always satisfy the grid invariants

mod fixtures;

use std::collections::HashSet;

use calendar_grid_layout::models::event::Event;
use calendar_grid_layout::models::layout::{LaneKind, TrackSlot, WeekLayout};
use calendar_grid_layout::services::layout::{reconcile_week, GridAssembler};
use chrono::Duration;
use fixtures::*;
use proptest::prelude::*;

/// (start day offset, start hour, start quarter, duration minutes, all day)
type EventSpec = (i64, u32, u32, i64, bool);

fn events_strategy() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(
        (-4i64..11, 0u32..24, 0u32..4, 0i64..(5 * 24 * 60), any::<bool>()),
        0..24,
    )
    .prop_map(|specs: Vec<EventSpec>| {
        specs
            .into_iter()
            .enumerate()
            .map(|(index, (offset, hour, quarter, minutes, all_day))| {
                let start = at(offset, hour, quarter * 15);
                let mut event = timed(index as i64, start, start + Duration::minutes(minutes));
                event.all_day = all_day;
                event
            })
            .collect()
    })
}

/// Distinct ids in arbitrary order, as a resolver might report them
fn shuffled_ids() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(0i64..8, 0..6)
        .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn banner_slot(id: i64) -> TrackSlot {
    if id % 2 == 0 {
        TrackSlot::MultiDay(id)
    } else {
        TrackSlot::AllDay(id)
    }
}

fn layout(events: &[Event]) -> WeekLayout {
    GridAssembler::new(monday_settings())
        .layout_week(&week_of(0, events))
        .unwrap()
}

proptest! {
    /// Property: no two slots of a day's banner lane hold the same event
    #[test]
    fn prop_no_track_collisions(events in events_strategy()) {
        for day in layout(&events).days {
            let ids: Vec<_> = day.tracks.iter().filter_map(TrackSlot::event_id).collect();
            let unique: HashSet<_> = ids.iter().collect();
            prop_assert_eq!(ids.len(), unique.len());
        }
    }

    /// Property: every banner event of a day is placed exactly once
    #[test]
    fn prop_every_banner_event_placed(events in events_strategy()) {
        for day in layout(&events).days {
            let placed: HashSet<_> = day.tracks.iter().filter_map(TrackSlot::event_id).collect();
            let expected: HashSet<_> = day
                .lanes
                .multi_day
                .iter()
                .chain(&day.lanes.all_day)
                .copied()
                .collect();
            prop_assert_eq!(placed, expected);
        }
    }

    /// Property: an event visible on consecutive days keeps its track
    #[test]
    fn prop_tracks_are_stable(events in events_strategy()) {
        let week = layout(&events);
        for pair in week.days.windows(2) {
            for slot in &pair[0].tracks {
                if let Some(id) = slot.event_id() {
                    if let Some(next) = pair[1].track_of(id) {
                        prop_assert_eq!(pair[0].track_of(id), Some(next));
                    }
                }
            }
        }
    }

    /// Property: bars never extend past the end of the row
    #[test]
    fn prop_spans_are_clipped(events in events_strategy()) {
        let week = layout(&events);
        let last_date = week.first_date + Duration::days(6);

        for (column, day) in week.days.iter().enumerate() {
            for cell in &day.cells {
                let Some(span) = cell.span else { continue };
                let event = events.iter().find(|event| Some(event.id) == cell.event_id).unwrap();

                prop_assert!(span.width >= 1);
                prop_assert!(span.width as usize <= 7 - column);
                prop_assert_eq!(span.overflows_week, event.last_day() > last_date);
                prop_assert_eq!(span.starts_before_week, event.first_day() < week.first_date);
            }
        }
    }

    /// Property: overlap counts only reference earlier events in the timed lane
    #[test]
    fn prop_overlap_counts_look_backwards(events in events_strategy()) {
        for day in layout(&events).days {
            for cell in day.cells.iter().filter(|cell| cell.lane == LaneKind::Timed) {
                let count = cell.overlap_count.unwrap();
                prop_assert!(count as usize <= cell.slot_index);
            }
        }
    }

    /// Property: the same input always renders to the same bytes
    #[test]
    fn prop_layout_is_idempotent(events in events_strategy()) {
        let first = serde_json::to_string(&layout(&events)).unwrap();
        let second = serde_json::to_string(&layout(&events)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: reconciling banner populations in any raw order keeps indices stable
    #[test]
    fn prop_reconciler_stability(population in prop::collection::vec(shuffled_ids(), 7)) {
        let days: Vec<_> = population
            .iter()
            .enumerate()
            .map(|(offset, ids)| {
                let refs: Vec<TrackSlot> = ids.iter().map(|id| banner_slot(*id)).collect();
                (day(offset as i64), refs)
            })
            .collect();

        let tracks = reconcile_week(&days).unwrap();

        for (index, day_tracks) in tracks.iter().enumerate() {
            let placed: Vec<_> = day_tracks.iter().filter_map(TrackSlot::event_id).collect();
            let unique: HashSet<_> = placed.iter().copied().collect();
            prop_assert_eq!(placed.len(), unique.len());
            let expected: HashSet<_> = population[index].iter().copied().collect();
            prop_assert_eq!(&unique, &expected);

            if index > 0 {
                let previous = &tracks[index - 1];
                for (position, slot) in day_tracks.iter().enumerate() {
                    if let Some(id) = slot.event_id() {
                        let before = previous.iter().position(|s| s.event_id() == Some(id));
                        if let Some(before) = before {
                            prop_assert_eq!(before, position);
                        }
                    }
                }
            }
        }
    }
}
