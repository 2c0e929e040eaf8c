// Settings module
// Grid and view configuration, loaded from TOML

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_FILE_NAME: &str = "calendar.toml";

/// Reasons a settings file is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("minutes_per_slot must divide an hour evenly (got {0})")]
    InvalidSlotMinutes(u32),
    #[error("week_slot_minutes must be a positive multiple of minutes_per_slot (got {0})")]
    InvalidWeekSlotMinutes(u32),
    #[error("slot_height must be a positive number (got {0})")]
    InvalidSlotHeight(f32),
    #[error("min_event_height must be a non-negative number (got {0})")]
    InvalidMinEventHeight(f32),
    #[error("display window {start}:00-{end}:00 is empty or exceeds the day")]
    InvalidWindow { start: u32, end: u32 },
    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),
    #[error("first_day_of_week must be 0 (Sunday) to 6 (Saturday), got {0}")]
    InvalidFirstDayOfWeek(u8),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Grid granularity for layout rounding and drag snapping
    pub minutes_per_slot: u32,
    /// Pixel height of one slot
    pub slot_height: f32,
    /// Minimum rendered height of an event block
    pub min_event_height: f32,
    /// First visible hour of the day view (inclusive)
    pub day_start_hour: u32,
    /// Last visible hour of the day view (exclusive)
    pub day_end_hour: u32,
    /// Row size of the week grid
    pub week_slot_minutes: u32,
    pub week_inline_limit: usize,
    pub month_inline_limit: usize,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    /// Length given to visits created from an empty slot or an unallocated drop
    pub default_visit_minutes: u32,
    /// Below this, a drag clamped at the window end shifts the start instead
    pub min_drag_duration_minutes: u32,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            minutes_per_slot: 10,
            slot_height: 12.0,
            min_event_height: 20.0,
            day_start_hour: 7,
            day_end_hour: 19,
            week_slot_minutes: 30,
            week_inline_limit: 3,
            month_inline_limit: 2,
            first_day_of_week: 0, // Sunday
            default_visit_minutes: 60,
            min_drag_duration_minutes: 30,
        }
    }
}

impl CalendarSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.minutes_per_slot == 0 || 60 % self.minutes_per_slot != 0 {
            return Err(SettingsError::InvalidSlotMinutes(self.minutes_per_slot));
        }

        if self.week_slot_minutes == 0 || self.week_slot_minutes % self.minutes_per_slot != 0 {
            return Err(SettingsError::InvalidWeekSlotMinutes(self.week_slot_minutes));
        }

        if !self.slot_height.is_finite() || self.slot_height <= 0.0 {
            return Err(SettingsError::InvalidSlotHeight(self.slot_height));
        }

        if !self.min_event_height.is_finite() || self.min_event_height < 0.0 {
            return Err(SettingsError::InvalidMinEventHeight(self.min_event_height));
        }

        if self.day_start_hour >= self.day_end_hour || self.day_end_hour > 24 {
            return Err(SettingsError::InvalidWindow {
                start: self.day_start_hour,
                end: self.day_end_hour,
            });
        }

        if self.week_inline_limit == 0 {
            return Err(SettingsError::ZeroLimit("week_inline_limit"));
        }
        if self.month_inline_limit == 0 {
            return Err(SettingsError::ZeroLimit("month_inline_limit"));
        }
        if self.default_visit_minutes == 0 {
            return Err(SettingsError::ZeroLimit("default_visit_minutes"));
        }

        if self.first_day_of_week > 6 {
            return Err(SettingsError::InvalidFirstDayOfWeek(self.first_day_of_week));
        }

        Ok(())
    }

    /// Parse and validate settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: CalendarSettings =
            toml::from_str(content).context("Failed to parse calendar settings")?;
        settings
            .validate()
            .context("Invalid calendar settings")?;
        Ok(settings)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Location of the per-user settings file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "CareBackOffice", "CareCalendar")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    /// Load from `path` (or the default location). A missing file yields defaults;
    /// a broken one is logged and also yields defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                log::warn!("Unable to resolve config directory; using default calendar settings");
                return Self::default();
            }
        };

        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded calendar settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize calendar settings")
    }
}
