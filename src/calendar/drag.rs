//! Drag-reschedule controller.
//!
//! A drag is an explicit session: `begin` captures the block's original top
//! and duration, `update` previews a snapped position and `end` commits or
//! rejects it. Updates take the cumulative pointer delta since `begin`, so
//! the preview is always recomputed from the original geometry and repeated
//! calls with the same delta give the same result.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use super::views::day_view::PlacedEvent;
use super::views::time_grid::{format_time_label, TimeGrid};
use crate::models::event::{CalendarEvent, EventKind};
use crate::models::settings::CalendarSettings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("A drag is already in progress for event '{0}'")]
    AlreadyDragging(String),

    #[error("No drag in progress")]
    NotDragging,

    #[error("Drag of event '{0}' produced an invalid time")]
    InvalidTime(String),

    #[error("Event '{0}' does not fit inside the visible hours")]
    OutOfWindow(String),

    #[error("Event '{0}' is not an unallocated visit")]
    NotUnallocated(String),

    #[error("Event '{0}' is not on the day grid")]
    UnknownEvent(String),
}

/// Live preview while the pointer moves.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    pub snapped_top: f32,
    pub start: NaiveDateTime,
    /// Tooltip text, e.g. "10:20 AM"
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// The block snapped back to where it started
    Unchanged,
    Moved(CalendarEvent),
}

#[derive(Debug, Clone, PartialEq)]
struct DragSession {
    event: CalendarEvent,
    date: NaiveDate,
    original_top: f32,
    duration: Duration,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum DragPhase {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    grid: TimeGrid,
    min_duration: Duration,
    phase: DragPhase,
}

impl DragController {
    pub fn new(grid: TimeGrid, min_duration_minutes: u32) -> Self {
        Self {
            grid,
            min_duration: Duration::minutes(min_duration_minutes as i64),
            phase: DragPhase::Idle,
        }
    }

    pub fn from_settings(settings: &CalendarSettings) -> Self {
        Self::new(
            TimeGrid::from_settings(settings),
            settings.min_drag_duration_minutes,
        )
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Id of the event being dragged.
    pub fn active_event(&self) -> Option<&str> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session.event.id.as_str()),
            DragPhase::Idle => None,
        }
    }

    pub fn begin(&mut self, placed: &PlacedEvent<'_>) -> Result<(), DragError> {
        if let DragPhase::Dragging(session) = &self.phase {
            return Err(DragError::AlreadyDragging(session.event.id.clone()));
        }

        log::debug!("Drag started for event {} at top {}", placed.event.id, placed.top);
        self.phase = DragPhase::Dragging(DragSession {
            event: placed.event.clone(),
            date: placed.event.date(),
            original_top: placed.top,
            duration: placed.event.duration(),
        });
        Ok(())
    }

    /// Snapped preview for a cumulative pointer delta. Does not change state.
    pub fn update(&self, delta_y: f32) -> Option<DragPreview> {
        let DragPhase::Dragging(session) = &self.phase else {
            return None;
        };
        let raw_top = session.original_top + delta_y;
        if !raw_top.is_finite() {
            return None;
        }
        let snapped_top = self.grid.snap_top(self.grid.clamp_top(raw_top));
        let start = self.grid.time_for_top(session.date, snapped_top)?;
        Some(DragPreview {
            snapped_top,
            start,
            label: format_time_label(start.time()),
        })
    }

    /// Finish the drag at a cumulative delta. The controller is idle afterwards
    /// whatever the result.
    pub fn end(&mut self, delta_y: f32) -> Result<DragOutcome, DragError> {
        let DragPhase::Dragging(session) = std::mem::take(&mut self.phase) else {
            return Err(DragError::NotDragging);
        };

        let result = self.resolve(&session, delta_y);
        match &result {
            Ok(DragOutcome::Moved(event)) => {
                log::debug!("Drag moved event {} to {} - {}", event.id, event.start, event.end);
            }
            Ok(DragOutcome::Unchanged) => {
                log::debug!("Drag of event {} ended where it started", session.event.id);
            }
            Err(err) => log::warn!("Drag rejected: {}", err),
        }
        result
    }

    /// Abandon the drag. Returns false when nothing was being dragged.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if let DragPhase::Dragging(session) = std::mem::take(&mut self.phase) {
            log::debug!("Drag cancelled for event {}", session.event.id);
        }
        was_dragging
    }

    fn resolve(&self, session: &DragSession, delta_y: f32) -> Result<DragOutcome, DragError> {
        let id = || session.event.id.clone();

        let raw_top = session.original_top + delta_y;
        if !raw_top.is_finite() {
            return Err(DragError::InvalidTime(id()));
        }
        let snapped_top = self.grid.snap_top(self.grid.clamp_top(raw_top));
        if snapped_top == self.grid.snap_top(session.original_top) {
            return Ok(DragOutcome::Unchanged);
        }

        let offset = self
            .grid
            .minutes_for_top(snapped_top)
            .ok_or_else(|| DragError::InvalidTime(id()))?;
        let minute_of_day = (self.grid.start_hour as i64 * 60)
            .checked_add(offset)
            .ok_or_else(|| DragError::InvalidTime(id()))?;
        let mut hour = minute_of_day.div_euclid(60);
        let mut minute = minute_of_day.rem_euclid(60);

        let min_hour = self.grid.start_hour as i64;
        let max_hour = self.grid.end_hour as i64 - 1;
        if hour < min_hour {
            hour = min_hour;
            minute = 0;
        } else if hour > max_hour {
            hour = max_hour;
        }

        let time = NaiveTime::from_hms_opt(hour as u32, minute as u32, 0)
            .ok_or_else(|| DragError::InvalidTime(id()))?;
        let (window_start, window_end) = self.grid.window_bounds(session.date);

        let mut start = session.date.and_time(time);
        let mut end = start + session.duration;
        if end > window_end {
            end = window_end;
            if end - start < self.min_duration {
                start = window_end - session.duration;
            }
        }
        if start < window_start {
            return Err(DragError::OutOfWindow(id()));
        }

        if start == session.event.start && end == session.event.end {
            return Ok(DragOutcome::Unchanged);
        }
        Ok(DragOutcome::Moved(session.event.rescheduled(start, end)))
    }
}

/// Turn an unallocated visit dropped on a day-grid slot into a scheduled
/// visit of `duration_minutes`, clamped to the window end.
pub fn place_unallocated(
    event: &CalendarEvent,
    date: NaiveDate,
    slot: u32,
    grid: &TimeGrid,
    duration_minutes: u32,
) -> Result<CalendarEvent, DragError> {
    let EventKind::Unallocated { visit_type } = event.kind else {
        return Err(DragError::NotUnallocated(event.id.clone()));
    };
    if slot >= grid.slot_count() {
        return Err(DragError::OutOfWindow(event.id.clone()));
    }

    let start = grid.slot_start(date, slot);
    let end = (start + Duration::minutes(duration_minutes as i64)).min(grid.window_bounds(date).1);

    let mut placed = event.rescheduled(start, end);
    placed.kind = EventKind::Visit { visit_type };
    log::debug!("Placed unallocated visit {} at {}", placed.id, start);
    Ok(placed)
}
