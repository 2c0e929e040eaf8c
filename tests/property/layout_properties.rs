// Property-based tests for the day layout and drag controller
// Random visit sets must never overlap within a column, and drags that
// snap back must leave events untouched.

#[path = "../fixtures/mod.rs"]
mod fixtures;

use care_calendar::calendar::views::day_view::DayLayout;
use care_calendar::calendar::views::time_grid::TimeGrid;
use care_calendar::calendar::{DragController, DragOutcome};
use care_calendar::models::event::CalendarEvent;
use care_calendar::models::settings::CalendarSettings;
use fixtures::{dates, events};
use proptest::prelude::*;

/// (start minutes past 07:00, length minutes) inside the 07:00-19:00 window
fn interval() -> impl Strategy<Value = (i64, i64)> {
    (0i64..700, 0i64..180)
}

fn build(intervals: &[(i64, i64)]) -> Vec<CalendarEvent> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, (start, length))| events::visit(i, *start, *length, "w1", "c1"))
        .collect()
}

proptest! {
    /// Property: no two events sharing a column cover a common slot
    #[test]
    fn prop_columns_never_overlap(intervals in prop::collection::vec(interval(), 0..25)) {
        let events = build(&intervals);
        let refs: Vec<&CalendarEvent> = events.iter().collect();
        let layout = DayLayout::compute(dates::visit_day(), &refs, &TimeGrid::default());

        prop_assert_eq!(layout.placed.len(), events.len());
        for (i, a) in layout.placed.iter().enumerate() {
            prop_assert!(a.column < layout.total_columns);
            prop_assert!(a.start_slot < a.end_slot);
            for b in layout.placed.iter().skip(i + 1) {
                if a.column == b.column {
                    prop_assert!(
                        !a.overlaps(b),
                        "{} and {} share column {}",
                        a.event.id,
                        b.event.id,
                        a.column
                    );
                }
            }
        }
    }

    /// Property: the column count equals the deepest slot overlap
    #[test]
    fn prop_column_count_is_minimal(
        slots in prop::collection::vec((0i64..70, 1i64..12), 1..20)
    ) {
        // Whole-slot events so rounding cannot change the intervals
        let intervals: Vec<(i64, i64)> = slots.iter().map(|(s, l)| (s * 10, l * 10)).collect();
        let events = build(&intervals);
        let refs: Vec<&CalendarEvent> = events.iter().collect();
        let grid = TimeGrid::default();
        let layout = DayLayout::compute(dates::visit_day(), &refs, &grid);

        let mut depth = vec![0usize; grid.slot_count() as usize];
        for placed in &layout.placed {
            for slot in placed.start_slot..placed.end_slot {
                depth[slot as usize] += 1;
            }
        }
        let max_depth = depth.into_iter().max().unwrap_or(0);
        prop_assert_eq!(layout.total_columns, max_depth);
    }

    /// Property: geometry stays inside the track for any width
    #[test]
    fn prop_rects_fit_track(
        intervals in prop::collection::vec(interval(), 1..10),
        width in 0.0f32..2000.0
    ) {
        let events = build(&intervals);
        let refs: Vec<&CalendarEvent> = events.iter().collect();
        let layout = DayLayout::compute(dates::visit_day(), &refs, &TimeGrid::default());

        for (_, rect) in layout.geometry(width) {
            prop_assert!(rect.left >= 0.0);
            prop_assert!(rect.left + rect.width <= width + 0.01);
            prop_assert!(rect.height >= 20.0);
        }
    }

    /// Property: a drag released within half a slot of its origin changes nothing
    #[test]
    fn prop_net_zero_drag_unchanged(
        (start, length) in interval(),
        jitter in -5.9f32..5.9
    ) {
        let event = events::visit(0, start, length, "w1", "c1");
        let refs = vec![&event];
        let layout = DayLayout::compute(dates::visit_day(), &refs, &TimeGrid::default());

        let mut controller = DragController::from_settings(&CalendarSettings::default());
        controller.begin(&layout.placed[0]).unwrap();
        prop_assert_eq!(controller.end(jitter).unwrap(), DragOutcome::Unchanged);
    }

    /// Property: cancelling after any preview leaves the controller idle
    #[test]
    fn prop_cancel_after_preview(
        (start, length) in interval(),
        delta in -400.0f32..400.0
    ) {
        let event = events::visit(0, start, length, "w1", "c1");
        let refs = vec![&event];
        let layout = DayLayout::compute(dates::visit_day(), &refs, &TimeGrid::default());

        let mut controller = DragController::from_settings(&CalendarSettings::default());
        controller.begin(&layout.placed[0]).unwrap();
        let first = controller.update(delta);
        prop_assert_eq!(controller.update(delta), first);
        prop_assert!(controller.cancel());
        prop_assert!(!controller.is_dragging());
    }
}
