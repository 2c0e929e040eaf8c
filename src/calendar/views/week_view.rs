//! Week-view grid binner.
//!
//! Buckets events into (day, time-slot) cells. Slots and events both go
//! through [`WeekGrid::slot_index`], so an event always lands in the row
//! whose label covers its start; an off-grid start such as 2:05 PM falls
//! into the 2:00 PM row instead of disappearing.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

use super::time_grid::format_time_label;
use super::{ExpansionState, OverflowCell};
use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;
use crate::utils::date::{minutes_of_day, week_dates};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekCellKey {
    pub date: NaiveDate,
    pub slot: u32,
}

/// One row of the week grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSlot {
    pub index: u32,
    pub start: NaiveTime,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid<'a> {
    pub dates: Vec<NaiveDate>,
    pub slots: Vec<WeekSlot>,
    cells: BTreeMap<WeekCellKey, Vec<&'a CalendarEvent>>,
    /// Events of this week starting outside the visible hours
    pub unbinned: Vec<&'a CalendarEvent>,
    start_minute: u32,
    slot_minutes: u32,
    inline_limit: usize,
}

impl<'a> WeekGrid<'a> {
    pub fn compute(
        anchor: NaiveDate,
        events: &[&'a CalendarEvent],
        settings: &CalendarSettings,
    ) -> Self {
        let dates = week_dates(anchor, settings.first_day_of_week);
        let start_minute = settings.day_start_hour * 60;
        let slot_minutes = settings.week_slot_minutes;
        let slot_count = (settings.day_end_hour - settings.day_start_hour) * 60 / slot_minutes;

        let slots = (0..slot_count)
            .map(|index| {
                let start = NaiveTime::MIN
                    + Duration::minutes((start_minute + index * slot_minutes) as i64);
                WeekSlot {
                    index,
                    start,
                    label: format_time_label(start),
                }
            })
            .collect();

        let mut grid = Self {
            dates,
            slots,
            cells: BTreeMap::new(),
            unbinned: Vec::new(),
            start_minute,
            slot_minutes,
            inline_limit: settings.week_inline_limit,
        };

        let mut week_events: Vec<&CalendarEvent> = events
            .iter()
            .copied()
            .filter(|event| grid.dates.contains(&event.date()))
            .collect();
        week_events.sort_by_key(|event| event.start);

        for event in week_events {
            match grid.slot_index(event.start) {
                Some(slot) => grid
                    .cells
                    .entry(WeekCellKey {
                        date: event.date(),
                        slot,
                    })
                    .or_default()
                    .push(event),
                None => grid.unbinned.push(event),
            }
        }

        if !grid.unbinned.is_empty() {
            log::debug!(
                "{} event(s) in week of {} start outside visible hours",
                grid.unbinned.len(),
                grid.dates[0]
            );
        }

        grid
    }

    /// Row containing `instant`, or `None` outside the visible hours.
    pub fn slot_index(&self, instant: NaiveDateTime) -> Option<u32> {
        let offset = minutes_of_day(instant.time()) - self.start_minute as f64;
        if offset < 0.0 {
            return None;
        }
        let index = (offset / self.slot_minutes as f64).floor() as u32;
        ((index as usize) < self.slots.len()).then_some(index)
    }

    pub fn slot_for_label(&self, label: &str) -> Option<&WeekSlot> {
        self.slots.iter().find(|slot| slot.label == label)
    }

    pub fn events_in(&self, key: WeekCellKey) -> &[&'a CalendarEvent] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(
        &self,
        key: WeekCellKey,
        expansion: &ExpansionState<WeekCellKey>,
    ) -> OverflowCell<'a> {
        OverflowCell::new(
            self.events_in(key).to_vec(),
            self.inline_limit,
            expansion.is_expanded(&key),
        )
    }

    /// Number of binned events per day, for the column headers.
    pub fn day_totals(&self) -> Vec<(NaiveDate, usize)> {
        self.dates
            .iter()
            .map(|date| {
                let total = self
                    .cells
                    .iter()
                    .filter(|(key, _)| key.date == *date)
                    .map(|(_, events)| events.len())
                    .sum();
                (*date, total)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.unbinned.is_empty()
    }
}
