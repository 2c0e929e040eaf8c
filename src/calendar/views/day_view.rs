//! Day-view layout engine.
//!
//! Places the events of one day on the time grid without visual overlap:
//! rounded vertical geometry first, then greedy column packing over the grid
//! slots each event spans. Horizontal geometry is derived from the column
//! assignment on demand so a container resize never re-runs the packing.

use chrono::NaiveDate;

use super::time_grid::TimeGrid;
use crate::models::event::CalendarEvent;
use crate::services::filter::events_on;

/// An event with its column and vertical geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent<'a> {
    pub event: &'a CalendarEvent,
    pub column: usize,
    /// First grid slot covered
    pub start_slot: u32,
    /// One past the last grid slot covered
    pub end_slot: u32,
    pub top: f32,
    pub height: f32,
}

impl PlacedEvent<'_> {
    pub fn overlaps(&self, other: &PlacedEvent<'_>) -> bool {
        self.start_slot < other.end_slot && other.start_slot < self.end_slot
    }
}

/// Pixel rectangle of an event block inside the day track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout<'a> {
    pub date: NaiveDate,
    /// Placed events in start order
    pub placed: Vec<PlacedEvent<'a>>,
    pub total_columns: usize,
    /// Events of this day lying entirely outside the display window
    pub out_of_window: Vec<&'a CalendarEvent>,
}

impl<'a> DayLayout<'a> {
    /// Lay out the events starting on `date`. Other days' events are ignored.
    pub fn compute(date: NaiveDate, events: &[&'a CalendarEvent], grid: &TimeGrid) -> Self {
        let day_events = events_on(events, date);
        let window = grid.window_seconds();
        let slot_seconds = grid.slot_seconds();

        let mut placed = Vec::with_capacity(day_events.len());
        let mut out_of_window = Vec::new();

        // occupancy[slot] lists the columns taken in that slot
        let mut occupancy: Vec<Vec<usize>> = vec![Vec::new(); grid.slot_count() as usize];
        let mut total_columns = 0usize;

        for event in day_events {
            let start = grid.offset_seconds(date, event.start);
            let end = grid.offset_seconds(date, event.end);

            let intersects = start < window && (end > 0 || (start == end && start >= 0));
            if !intersects {
                out_of_window.push(event);
                continue;
            }

            let mut rounded_start = grid.round_to_grid(start.clamp(0, window));
            let mut rounded_end = grid.round_to_grid(end.clamp(0, window));
            if rounded_start >= window {
                rounded_start = window - slot_seconds;
            }
            if rounded_end - rounded_start < slot_seconds {
                rounded_end = rounded_start + slot_seconds;
            }

            let start_slot = (rounded_start / slot_seconds) as u32;
            let end_slot = (rounded_end / slot_seconds) as u32;

            let column = first_free_column(&occupancy[start_slot as usize..end_slot as usize]);
            for slot in &mut occupancy[start_slot as usize..end_slot as usize] {
                slot.push(column);
            }
            total_columns = total_columns.max(column + 1);

            let slots = (end_slot - start_slot) as f32;
            placed.push(PlacedEvent {
                event,
                column,
                start_slot,
                end_slot,
                top: grid.top_for_slot(start_slot),
                height: (slots * grid.slot_height).max(grid.min_event_height),
            });
        }

        if !out_of_window.is_empty() {
            log::debug!(
                "{} event(s) on {} fall outside the {}:00-{}:00 window",
                out_of_window.len(),
                date,
                grid.start_hour,
                grid.end_hour
            );
        }

        Self {
            date,
            placed,
            total_columns,
            out_of_window,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty() && self.out_of_window.is_empty()
    }

    pub fn find(&self, event_id: &str) -> Option<&PlacedEvent<'a>> {
        self.placed.iter().find(|placed| placed.event.id == event_id)
    }

    /// Columns the track is divided into. A missing, zero or non-finite width
    /// (e.g. during initial mount) degrades to one column.
    pub fn effective_columns(&self, track_width: f32) -> usize {
        if !track_width.is_finite() || track_width <= 0.0 {
            return 1;
        }
        self.total_columns.max(1)
    }

    pub fn column_width(&self, track_width: f32) -> f32 {
        let width = if track_width.is_finite() {
            track_width.max(0.0)
        } else {
            0.0
        };
        width / self.effective_columns(track_width) as f32
    }

    pub fn rect(&self, placed: &PlacedEvent<'_>, track_width: f32) -> EventRect {
        let column_width = self.column_width(track_width);
        let column = if self.effective_columns(track_width) == 1 {
            0
        } else {
            placed.column
        };
        EventRect {
            left: column as f32 * column_width,
            top: placed.top,
            width: column_width,
            height: placed.height,
        }
    }

    /// Rectangles for every placed event at the given track width.
    pub fn geometry(&self, track_width: f32) -> Vec<(&PlacedEvent<'a>, EventRect)> {
        self.placed
            .iter()
            .map(|placed| (placed, self.rect(placed, track_width)))
            .collect()
    }
}

fn first_free_column(slots: &[Vec<usize>]) -> usize {
    (0..)
        .find(|column| !slots.iter().any(|taken| taken.contains(column)))
        .unwrap_or(0)
}
