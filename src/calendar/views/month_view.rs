//! Month-view grid binner: whole weeks covering the month, one cell per date.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use super::{ExpansionState, OverflowCell};
use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;
use crate::utils::date::month_grid_dates;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthDay<'a> {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months
    pub in_current_month: bool,
    pub events: Vec<&'a CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    pub days: Vec<MonthDay<'a>>,
    inline_limit: usize,
}

impl<'a> MonthGrid<'a> {
    pub fn compute(
        anchor: NaiveDate,
        events: &[&'a CalendarEvent],
        settings: &CalendarSettings,
    ) -> Self {
        let dates = month_grid_dates(anchor, settings.first_day_of_week);

        let mut by_date: BTreeMap<NaiveDate, Vec<&'a CalendarEvent>> = BTreeMap::new();
        for event in events.iter().copied() {
            by_date.entry(event.date()).or_default().push(event);
        }

        let days = dates
            .into_iter()
            .map(|date| {
                let mut events = by_date.remove(&date).unwrap_or_default();
                events.sort_by_key(|event| event.start);
                MonthDay {
                    date,
                    in_current_month: date.month() == anchor.month()
                        && date.year() == anchor.year(),
                    events,
                }
            })
            .collect();

        Self {
            year: anchor.year(),
            month: anchor.month(),
            days,
            inline_limit: settings.month_inline_limit,
        }
    }

    /// Rows of seven days.
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthDay<'a>]> {
        self.days.chunks(7)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&MonthDay<'a>> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Overflow cell for `date`; dates outside the grid give an empty cell.
    pub fn cell(&self, date: NaiveDate, expansion: &ExpansionState<NaiveDate>) -> OverflowCell<'a> {
        let events = self
            .day(date)
            .map(|day| day.events.clone())
            .unwrap_or_default();
        OverflowCell::new(events, self.inline_limit, expansion.is_expanded(&date))
    }

    pub fn event_count(&self) -> usize {
        self.days.iter().map(|day| day.events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ymd(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn event(id: &str, date: NaiveDate, hour: u32) -> CalendarEvent {
        let start = date.and_hms_opt(hour, 0, 0).unwrap();
        CalendarEvent::new(id, id, start, start + Duration::hours(1)).unwrap()
    }

    #[test]
    fn test_grid_covers_whole_weeks() {
        let grid = MonthGrid::compute(ymd(4, 15), &[], &CalendarSettings::default());
        assert_eq!(grid.days.len(), 35);
        assert_eq!(grid.days[0].date, ymd(3, 30));
        assert!(!grid.days[0].in_current_month);
        assert_eq!(grid.days[34].date, ymd(5, 3));
        assert_eq!(grid.weeks().count(), 5);
        assert!(grid.weeks().all(|week| week.len() == 7));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_events_binned_by_date_in_start_order() {
        let events = [
            event("late", ymd(4, 10), 15),
            event("early", ymd(4, 10), 8),
            event("borrowed", ymd(3, 31), 9),
            event("outside", ymd(6, 1), 9),
        ];
        let refs: Vec<&CalendarEvent> = events.iter().collect();
        let grid = MonthGrid::compute(ymd(4, 1), &refs, &CalendarSettings::default());

        let ids: Vec<&str> = grid
            .day(ymd(4, 10))
            .unwrap()
            .events
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
        assert_eq!(grid.day(ymd(3, 31)).unwrap().events.len(), 1);
        assert_eq!(grid.event_count(), 3);
    }

    #[test]
    fn test_month_cell_overflow() {
        let events: Vec<CalendarEvent> = (0..4)
            .map(|i| event(&format!("e{}", i), ymd(4, 10), 8 + i))
            .collect();
        let refs: Vec<&CalendarEvent> = events.iter().collect();
        let grid = MonthGrid::compute(ymd(4, 1), &refs, &CalendarSettings::default());

        let mut expansion = ExpansionState::default();
        let cell = grid.cell(ymd(4, 10), &expansion);
        assert_eq!(cell.visible().len(), 2);
        assert_eq!(cell.more_label().as_deref(), Some("+2 more"));

        expansion.toggle(ymd(4, 10));
        assert_eq!(grid.cell(ymd(4, 10), &expansion).visible().len(), 4);
        assert!(grid.cell(ymd(7, 1), &expansion).is_empty());
    }
}
