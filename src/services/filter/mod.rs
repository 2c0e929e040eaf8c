//! Filter pipeline.
//!
//! Derives the visible event subset from normalized events and the
//! selection store. Every function here is pure: same events, selection and
//! perspective give the same output.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::event::CalendarEvent;
use crate::services::selection::{MatchField, Perspective, SelectionSet, SelectionStore};

/// Visible events split by whether they belong on the grids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredEvents<'a> {
    /// Visits and leave, in input order
    pub scheduled: Vec<&'a CalendarEvent>,
    /// Visits waiting for a staff member or time slot
    pub unallocated: Vec<&'a CalendarEvent>,
}

impl FilteredEvents<'_> {
    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty() && self.unallocated.is_empty()
    }
}

/// The one predicate behind every filter: empty selection matches all.
pub fn matches(event: &CalendarEvent, selection: &SelectionSet, field: MatchField) -> bool {
    selection.matches(field.key(event))
}

/// Perspective-independent coarse filter over an explicit selection and field.
pub fn prefilter<'a>(
    events: &'a [CalendarEvent],
    selection: &SelectionSet,
    field: MatchField,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| matches(event, selection, field))
        .collect()
}

/// Whether an event is visible under the store's current perspective.
pub fn is_visible(event: &CalendarEvent, store: &SelectionStore) -> bool {
    let (selection, field) = store.active_selection();
    matches(event, &selection, field)
}

/// Grid filter: visible events under the active perspective, split into
/// scheduled and unallocated.
///
/// Unallocated visits have no staff member yet, so staff perspectives list
/// all of them; the client perspective filters them like any visit.
pub fn filter_events<'a>(
    events: &'a [CalendarEvent],
    store: &SelectionStore,
) -> FilteredEvents<'a> {
    let (selection, field) = store.active_selection();
    let mut filtered = FilteredEvents::default();

    for event in events {
        if event.kind.is_scheduled() {
            if matches(event, &selection, field) {
                filtered.scheduled.push(event);
            }
        } else if store.perspective() != Perspective::Clients
            || matches(event, &selection, field)
        {
            filtered.unallocated.push(event);
        }
    }

    log::debug!(
        "Filtered {} events to {} scheduled + {} unallocated ({:?}, {} selected)",
        events.len(),
        filtered.scheduled.len(),
        filtered.unallocated.len(),
        store.perspective(),
        selection.len()
    );

    filtered
}

/// Scheduled events per start date, for the week/month header counters.
pub fn count_by_day(
    events: &[CalendarEvent],
    selection: &SelectionSet,
    field: MatchField,
) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for event in prefilter(events, selection, field) {
        if event.kind.is_scheduled() {
            *counts.entry(event.date()).or_insert(0) += 1;
        }
    }
    counts
}

/// Events starting on `date`, stably sorted by start time only.
pub fn events_on<'a>(events: &[&'a CalendarEvent], date: NaiveDate) -> Vec<&'a CalendarEvent> {
    let mut day_events: Vec<&CalendarEvent> = events
        .iter()
        .copied()
        .filter(|event| event.starts_on(date))
        .collect();
    day_events.sort_by_key(|event| event.start);
    day_events
}
