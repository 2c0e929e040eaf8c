// View state
// Active view plus the anchor date every range is derived from

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::date::{first_of_month, last_of_month, shift_month_preserving_day, week_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    Day,
    #[default]
    Week,
    Month,
}

impl ViewType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }
}

/// Date navigation requested by the surrounding page chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    Today(NaiveDate),
    /// Date picker selection
    Jump(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub current_date: NaiveDate,
    pub active_view: ViewType,
}

impl ViewState {
    pub fn new(current_date: NaiveDate, active_view: ViewType) -> Self {
        Self {
            current_date,
            active_view,
        }
    }

    /// Apply a navigation step; returns the new anchor date.
    pub fn navigate(&mut self, navigation: Navigation) -> NaiveDate {
        self.current_date = match navigation {
            Navigation::Previous => self.step(-1),
            Navigation::Next => self.step(1),
            Navigation::Today(today) => today,
            Navigation::Jump(date) => date,
        };
        self.current_date
    }

    fn step(&self, direction: i32) -> NaiveDate {
        match self.active_view {
            ViewType::Day => self.current_date + Duration::days(direction as i64),
            ViewType::Week => self.current_date + Duration::weeks(direction as i64),
            ViewType::Month => shift_month_preserving_day(self.current_date, direction),
        }
    }

    /// Inclusive date range shown by the active view.
    pub fn visible_range(&self, first_day_of_week: u8) -> (NaiveDate, NaiveDate) {
        match self.active_view {
            ViewType::Day => (self.current_date, self.current_date),
            ViewType::Week => {
                let start = week_start(self.current_date, first_day_of_week);
                (start, start + Duration::days(6))
            }
            ViewType::Month => (
                first_of_month(self.current_date),
                last_of_month(self.current_date),
            ),
        }
    }
}
