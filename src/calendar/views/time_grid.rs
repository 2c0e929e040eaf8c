//! Fixed-granularity time grid shared by the day layout and drag snapping.
//!
//! Offsets are measured from the start of the display window. Rounding and
//! snapping both go through this type so that a block drawn at a given top
//! converts back to the same time.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::settings::CalendarSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    pub minutes_per_slot: u32,
    pub slot_height: f32,
    pub min_event_height: f32,
    /// First visible hour (inclusive)
    pub start_hour: u32,
    /// Last visible hour (exclusive)
    pub end_hour: u32,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::from_settings(&CalendarSettings::default())
    }
}

impl TimeGrid {
    pub fn from_settings(settings: &CalendarSettings) -> Self {
        Self {
            minutes_per_slot: settings.minutes_per_slot,
            slot_height: settings.slot_height,
            min_event_height: settings.min_event_height,
            start_hour: settings.day_start_hour,
            end_hour: settings.day_end_hour,
        }
    }

    pub fn window_minutes(&self) -> u32 {
        (self.end_hour - self.start_hour) * 60
    }

    pub fn slot_seconds(&self) -> i64 {
        self.minutes_per_slot as i64 * 60
    }

    pub fn window_seconds(&self) -> i64 {
        self.window_minutes() as i64 * 60
    }

    pub fn slot_count(&self) -> u32 {
        self.window_minutes() / self.minutes_per_slot
    }

    /// Pixel height of the whole window.
    pub fn total_height(&self) -> f32 {
        self.slot_count() as f32 * self.slot_height
    }

    /// Window start and end on `date`. An end hour of 24 is the next midnight.
    pub fn window_bounds(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let midnight = date.and_time(NaiveTime::MIN);
        (
            midnight + Duration::hours(self.start_hour as i64),
            midnight + Duration::hours(self.end_hour as i64),
        )
    }

    /// Seconds between the window start on `date` and `instant` (negative before the window).
    pub fn offset_seconds(&self, date: NaiveDate, instant: NaiveDateTime) -> i64 {
        (instant - self.window_bounds(date).0).num_seconds()
    }

    /// Round a non-negative offset to the nearest grid line; halves round up.
    pub fn round_to_grid(&self, offset_seconds: i64) -> i64 {
        let slot = self.slot_seconds();
        ((offset_seconds + slot / 2).div_euclid(slot)) * slot
    }

    pub fn top_for_slot(&self, slot: u32) -> f32 {
        slot as f32 * self.slot_height
    }

    /// Snap a pixel offset to the nearest slot boundary.
    pub fn snap_top(&self, raw_top: f32) -> f32 {
        (raw_top / self.slot_height).round() * self.slot_height
    }

    /// Keep a pointer offset within one window height either side of the grid.
    /// Times further out clamp to the same hour anyway.
    pub fn clamp_top(&self, top: f32) -> f32 {
        let height = self.total_height();
        top.clamp(-height, 2.0 * height)
    }

    /// Minutes since the window start represented by a pixel offset.
    pub fn minutes_for_top(&self, top: f32) -> Option<i64> {
        let minutes = (top / self.slot_height) * self.minutes_per_slot as f32;
        minutes.is_finite().then(|| minutes.round() as i64)
    }

    /// Wall-clock time at a pixel offset, e.g. for a drag tooltip.
    pub fn time_for_top(&self, date: NaiveDate, top: f32) -> Option<NaiveDateTime> {
        let minutes = self.minutes_for_top(top)?;
        self.window_bounds(date)
            .0
            .checked_add_signed(Duration::try_minutes(minutes)?)
    }

    pub fn slot_start(&self, date: NaiveDate, slot: u32) -> NaiveDateTime {
        self.window_bounds(date).0 + Duration::minutes((slot * self.minutes_per_slot) as i64)
    }
}

/// 12-hour label used for slot headers and tooltips ("2:00 PM").
pub fn format_time_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    #[test]
    fn test_default_grid() {
        let grid = TimeGrid::default();
        assert_eq!(grid.window_minutes(), 720);
        assert_eq!(grid.slot_count(), 72);
        assert_eq!(grid.total_height(), 864.0);
    }

    #[test]
    fn test_round_to_grid() {
        let grid = TimeGrid::default();
        assert_eq!(grid.round_to_grid(0), 0);
        assert_eq!(grid.round_to_grid(4 * 60 + 59), 0);
        assert_eq!(grid.round_to_grid(5 * 60), 600);
        assert_eq!(grid.round_to_grid(15 * 60), 1200);
        assert_eq!(grid.round_to_grid(45 * 60), 3000);
    }

    #[test]
    fn test_clamp_top() {
        let grid = TimeGrid::default();
        assert_eq!(grid.clamp_top(120.0), 120.0);
        assert_eq!(grid.clamp_top(-1.0e12), -864.0);
        assert_eq!(grid.clamp_top(1.0e30), 1728.0);
    }

    #[test]
    fn test_time_for_top_out_of_range() {
        let grid = TimeGrid::default();
        assert_eq!(grid.time_for_top(date(), 1.0e30), None);
        assert_eq!(grid.time_for_top(date(), 24.0), date().and_hms_opt(7, 20, 0));
    }

    #[test]
    fn test_snap_top() {
        let grid = TimeGrid::default();
        assert_eq!(grid.snap_top(17.0), 12.0);
        assert_eq!(grid.snap_top(18.0), 24.0);
        assert_eq!(grid.snap_top(-5.0), 0.0);
    }

    #[test]
    fn test_time_for_top() {
        let grid = TimeGrid::default();
        let time = grid.time_for_top(date(), 240.0).unwrap();
        assert_eq!(time.time(), NaiveTime::from_hms_opt(10, 20, 0).unwrap());
        assert_eq!(grid.time_for_top(date(), f32::NAN), None);
    }

    #[test]
    fn test_window_end_at_midnight() {
        let grid = TimeGrid {
            end_hour: 24,
            ..TimeGrid::default()
        };
        let (_, end) = grid.window_bounds(date());
        assert_eq!(end, date().succ_opt().unwrap().and_time(NaiveTime::MIN));
    }

    #[test]
    fn test_format_time_label() {
        assert_eq!(format_time_label(NaiveTime::from_hms_opt(14, 0, 0).unwrap()), "2:00 PM");
        assert_eq!(format_time_label(NaiveTime::from_hms_opt(9, 30, 0).unwrap()), "9:30 AM");
    }
}
