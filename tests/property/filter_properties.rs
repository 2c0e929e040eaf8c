// Property-based tests for the filter pipeline
// Filtering is pure, idempotent, and an empty selection never hides anything.

#[path = "../fixtures/mod.rs"]
mod fixtures;

use care_calendar::models::entity::SelectableEntity;
use care_calendar::models::event::CalendarEvent;
use care_calendar::services::filter::{filter_events, is_visible, matches, prefilter};
use care_calendar::services::selection::{Perspective, SelectionStore};
use fixtures::events;
use proptest::prelude::*;

const WORKERS: [&str; 4] = ["w1", "w2", "w3", "w4"];
const CLIENTS: [&str; 4] = ["c1", "c2", "c3", "c4"];

fn event_set() -> impl Strategy<Value = Vec<CalendarEvent>> {
    prop::collection::vec((0i64..700, 0i64..120, 0usize..4, 0usize..4), 0..30).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (start, length, worker, client))| {
                    events::visit(i, start, length, WORKERS[worker], CLIENTS[client])
                })
                .collect()
        },
    )
}

fn perspective() -> impl Strategy<Value = Perspective> {
    prop::sample::select(Perspective::ALL.to_vec())
}

fn store(selected_workers: &[bool], selected_clients: &[bool]) -> SelectionStore {
    let entities = |ids: &[&str], flags: &[bool]| -> Vec<SelectableEntity> {
        ids.iter()
            .zip(flags)
            .map(|(id, selected)| {
                let mut entity = SelectableEntity::new(*id, *id);
                entity.selected = *selected;
                entity
            })
            .collect()
    };
    SelectionStore::new(
        entities(&CLIENTS, selected_clients),
        entities(&WORKERS, selected_workers),
        entities(&WORKERS, selected_workers),
    )
}

proptest! {
    /// Property: filtering the filtered output again changes nothing
    #[test]
    fn prop_filter_is_idempotent(
        events in event_set(),
        workers in prop::collection::vec(any::<bool>(), 4),
        clients in prop::collection::vec(any::<bool>(), 4),
        perspective in perspective()
    ) {
        let mut store = store(&workers, &clients);
        store.set_perspective(perspective);

        let once: Vec<CalendarEvent> = filter_events(&events, &store)
            .scheduled
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<CalendarEvent> = filter_events(&once, &store)
            .scheduled
            .into_iter()
            .cloned()
            .collect();
        prop_assert_eq!(once, twice);
    }

    /// Property: with nothing selected every perspective shows every event
    #[test]
    fn prop_empty_selection_is_identity(
        events in event_set(),
        perspective in perspective()
    ) {
        let mut store = store(&[false; 4], &[false; 4]);
        store.set_perspective(perspective);

        let filtered = filter_events(&events, &store);
        prop_assert_eq!(filtered.scheduled.len(), events.len());
        prop_assert!(events.iter().all(|event| is_visible(event, &store)));
    }

    /// Property: the coarse prefilter agrees with the perspective filter
    #[test]
    fn prop_prefilter_matches_perspective_filter(
        events in event_set(),
        workers in prop::collection::vec(any::<bool>(), 4),
        clients in prop::collection::vec(any::<bool>(), 4),
        perspective in perspective()
    ) {
        let mut store = store(&workers, &clients);
        store.set_perspective(perspective);
        let (selection, field) = store.active_selection();

        let coarse: Vec<&str> = prefilter(&events, &selection, field)
            .iter()
            .map(|event| event.id.as_str())
            .collect();
        let visible: Vec<&str> = filter_events(&events, &store)
            .scheduled
            .iter()
            .map(|event| event.id.as_str())
            .collect();
        prop_assert_eq!(coarse, visible);

        for event in &events {
            prop_assert_eq!(matches(event, &selection, field), is_visible(event, &store));
        }
    }
}
