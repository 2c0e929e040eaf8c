//! Calendar state owned by the host page.
//!
//! Holds the normalized events, the selection store, the view anchor and the
//! per-cell expansion flags. Layouts are computed on demand from borrowed
//! state; the only writes are data refreshes, navigation, committed drags and
//! unallocated drops. Results reach the host through [`CalendarHost`].

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

use super::drag::{place_unallocated, DragController, DragError, DragOutcome, DragPreview};
use super::views::day_view::DayLayout;
use super::views::month_view::MonthGrid;
use super::views::time_grid::TimeGrid;
use super::views::week_view::{WeekCellKey, WeekGrid};
use super::views::ExpansionState;
use crate::models::event::{CalendarEvent, EventKind, VisitType};
use crate::models::raw::{RawEntity, RawScheduleRecord};
use crate::models::settings::{CalendarSettings, SettingsError};
use crate::models::view::{Navigation, ViewState, ViewType};
use crate::services::filter::{count_by_day, filter_events, FilteredEvents};
use crate::services::normalizer::{normalize_entities, normalize_schedule, NormalizeReport};
use crate::services::selection::{Perspective, SelectionStore};

/// Id given to the synthetic event emitted for an empty-slot click.
pub const DRAFT_EVENT_ID: &str = "draft";

/// Callbacks into the embedding page. Only valid events ever cross this boundary.
#[cfg_attr(test, mockall::automock)]
pub trait CalendarHost {
    /// An event, or a draft for an empty slot, was clicked.
    fn on_select_event(&mut self, event: &CalendarEvent);

    /// An event was moved. The local copy is already updated.
    fn on_event_update(&mut self, event: &CalendarEvent);

    fn on_navigate(&mut self, date: NaiveDate);

    /// Aggregated message about dropped records, at most once per refresh.
    fn on_data_warning(&mut self, message: &str);
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub view: ViewState,
    pub selection: SelectionStore,
    settings: CalendarSettings,
    events: Vec<CalendarEvent>,
    report: NormalizeReport,
    week_expanded: ExpansionState<WeekCellKey>,
    month_expanded: ExpansionState<NaiveDate>,
    drag: DragController,
}

impl CalendarState {
    /// Fails when the grid parameters cannot produce a usable layout.
    pub fn new(settings: CalendarSettings, anchor: NaiveDate) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            view: ViewState::new(anchor, ViewType::default()),
            selection: SelectionStore::default(),
            drag: DragController::from_settings(&settings),
            settings,
            events: Vec::new(),
            report: NormalizeReport::default(),
            week_expanded: ExpansionState::default(),
            month_expanded: ExpansionState::default(),
        })
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    pub fn grid(&self) -> TimeGrid {
        TimeGrid::from_settings(&self.settings)
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn event(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Report of the last refresh.
    pub fn report(&self) -> &NormalizeReport {
        &self.report
    }

    /// Replace all events from a fresh batch of raw records. An in-flight drag
    /// refers to the old data and is dropped.
    pub fn replace_events(&mut self, records: &[RawScheduleRecord], host: &mut dyn CalendarHost) {
        self.drag.cancel();
        let normalized = normalize_schedule(records);
        if let Some(warning) = normalized.report.warning() {
            host.on_data_warning(&warning);
        }
        self.events = normalized.events;
        self.report = normalized.report;
    }

    /// Replace one perspective's entity list, keeping the current selection.
    pub fn replace_entities(&mut self, perspective: Perspective, records: &[RawEntity]) {
        let entities = normalize_entities(records);
        log::info!("Loaded {} entities for {:?}", entities.len(), perspective);
        self.selection.collection_mut(perspective).replace(entities);
    }

    pub fn visible(&self) -> FilteredEvents<'_> {
        filter_events(&self.events, &self.selection)
    }

    /// Scheduled events per day under the active selection, for header counters.
    pub fn day_counts(&self) -> BTreeMap<NaiveDate, usize> {
        let (selection, field) = self.selection.active_selection();
        count_by_day(&self.events, &selection, field)
    }

    pub fn day_layout(&self) -> DayLayout<'_> {
        DayLayout::compute(self.view.current_date, &self.visible().scheduled, &self.grid())
    }

    pub fn week_grid(&self) -> WeekGrid<'_> {
        WeekGrid::compute(self.view.current_date, &self.visible().scheduled, &self.settings)
    }

    pub fn month_grid(&self) -> MonthGrid<'_> {
        MonthGrid::compute(self.view.current_date, &self.visible().scheduled, &self.settings)
    }

    /// Apply a navigation step. The host hears about it only when the anchor moves.
    pub fn navigate(&mut self, navigation: Navigation, host: &mut dyn CalendarHost) -> NaiveDate {
        let previous = self.view.current_date;
        let date = self.view.navigate(navigation);
        if date != previous {
            self.reset_transient();
            host.on_navigate(date);
        }
        date
    }

    /// Returns true when the view actually changed.
    pub fn set_view(&mut self, view: ViewType) -> bool {
        if self.view.active_view == view {
            return false;
        }
        self.view.active_view = view;
        self.reset_transient();
        true
    }

    pub fn set_perspective(&mut self, perspective: Perspective) -> bool {
        self.selection.set_perspective(perspective)
    }

    pub fn toggle_week_cell(&mut self, key: WeekCellKey) -> bool {
        self.week_expanded.toggle(key)
    }

    pub fn toggle_month_day(&mut self, date: NaiveDate) -> bool {
        self.month_expanded.toggle(date)
    }

    pub fn week_expansion(&self) -> &ExpansionState<WeekCellKey> {
        &self.week_expanded
    }

    pub fn month_expansion(&self) -> &ExpansionState<NaiveDate> {
        &self.month_expanded
    }

    /// Forward a click on a rendered event. Unknown ids are ignored.
    pub fn select_event(&self, id: &str, host: &mut dyn CalendarHost) -> bool {
        match self.event(id) {
            Some(event) => {
                host.on_select_event(event);
                true
            }
            None => {
                log::debug!("Ignoring click on unknown event {}", id);
                false
            }
        }
    }

    /// Emit a draft visit for a click on an empty slot starting at `start`.
    pub fn select_slot(&self, start: NaiveDateTime, host: &mut dyn CalendarHost) -> CalendarEvent {
        let end = start + Duration::minutes(self.settings.default_visit_minutes as i64);
        let draft = CalendarEvent {
            id: DRAFT_EVENT_ID.to_string(),
            title: "New appointment".to_string(),
            start,
            end,
            resource_id: None,
            client_id: None,
            kind: EventKind::Visit {
                visit_type: VisitType::default(),
            },
            status: Default::default(),
            notes: None,
            client_name: None,
            staff_name: None,
        };
        host.on_select_event(&draft);
        draft
    }

    /// Start dragging an event placed on the current day grid.
    pub fn begin_drag(&mut self, id: &str) -> Result<(), DragError> {
        let visible = filter_events(&self.events, &self.selection);
        let grid = TimeGrid::from_settings(&self.settings);
        let layout = DayLayout::compute(self.view.current_date, &visible.scheduled, &grid);
        let placed = layout
            .find(id)
            .ok_or_else(|| DragError::UnknownEvent(id.to_string()))?;
        self.drag.begin(placed)
    }

    pub fn drag_preview(&self, delta_y: f32) -> Option<DragPreview> {
        self.drag.update(delta_y)
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    /// Finish a drag. A move is applied locally before the host is told.
    pub fn end_drag(
        &mut self,
        delta_y: f32,
        host: &mut dyn CalendarHost,
    ) -> Result<DragOutcome, DragError> {
        let outcome = self.drag.end(delta_y)?;
        if let DragOutcome::Moved(event) = &outcome {
            self.apply_update(event.clone())?;
            host.on_event_update(event);
        }
        Ok(outcome)
    }

    /// Drop an unallocated visit onto a day-grid slot of `date`.
    pub fn place_unallocated(
        &mut self,
        id: &str,
        date: NaiveDate,
        slot: u32,
        host: &mut dyn CalendarHost,
    ) -> Result<CalendarEvent, DragError> {
        let event = self
            .event(id)
            .ok_or_else(|| DragError::UnknownEvent(id.to_string()))?;
        let placed = place_unallocated(
            event,
            date,
            slot,
            &self.grid(),
            self.settings.default_visit_minutes,
        )?;
        self.apply_update(placed.clone())?;
        host.on_event_update(&placed);
        Ok(placed)
    }

    fn apply_update(&mut self, updated: CalendarEvent) -> Result<(), DragError> {
        let slot = self
            .events
            .iter_mut()
            .find(|event| event.id == updated.id)
            .ok_or_else(|| DragError::UnknownEvent(updated.id.clone()))?;
        *slot = updated;
        Ok(())
    }

    /// Expanded cells and any drag belong to the previous view.
    fn reset_transient(&mut self) {
        self.drag.cancel();
        self.week_expanded.collapse_all();
        self.month_expanded.collapse_all();
    }
}
