// Date utility functions
// Calendar arithmetic shared by the view state and the binners

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Start of the week containing `date`.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// The seven dates of the week containing `date`.
pub fn week_dates(date: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let start = week_start(date, first_day_of_week);
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let last = last_day_of_month(date.year(), date.month());
    date.with_day(last).unwrap_or(date)
}

/// Move by whole months, clamping the day to the target month's length
/// (Jan 31 + 1 month = Feb 28/29).
pub fn shift_month_preserving_day(current: NaiveDate, delta_months: i32) -> NaiveDate {
    let total_months = (current.year() * 12) + (current.month() as i32 - 1) + delta_months;
    let new_year = total_months.div_euclid(12);
    let new_month = total_months.rem_euclid(12) as u32 + 1;
    let day = current.day().min(last_day_of_month(new_year, new_month));
    NaiveDate::from_ymd_opt(new_year, new_month, day).unwrap_or(current)
}

/// Whole weeks covering the month of `date`, starting on `first_day_of_week`.
pub fn month_grid_dates(date: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let grid_start = week_start(first_of_month(date), first_day_of_week);
    let grid_end = week_start(last_of_month(date), first_day_of_week) + Duration::days(6);
    grid_start
        .iter_days()
        .take_while(|day| *day <= grid_end)
        .collect()
}

/// Minutes elapsed since midnight, seconds included as a fraction.
pub fn minutes_of_day(time: NaiveTime) -> f64 {
    time.num_seconds_from_midnight() as f64 / 60.0
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
