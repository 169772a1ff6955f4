//! Board configuration.
//!
//! All fields have defaults matching the workshop board: 9 working hours
//! per day, Friday as the weekly rest day, one year of look-ahead when
//! skipping non-working days.
//!
//! Deserializes from any serde format; missing fields take their default.
//!
//! ```
//! use chrono::Weekday;
//! use u_taskboard::BoardConfig;
//!
//! let config = BoardConfig::default().with_rest_weekday(Weekday::Sun);
//! assert_eq!(config.daily_capacity_hours, 9);
//! assert!(config.validate().is_ok());
//! ```

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Default working hours per day.
pub const DEFAULT_DAILY_CAPACITY_HOURS: u32 = 9;

/// Default bound on consecutive non-working days skipped by the span calculator.
pub const DEFAULT_MAX_LOOK_AHEAD_DAYS: u32 = 366;

/// Scheduling parameters shared by the calendar, span calculator and board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Working hours per day (hour offsets `0..daily_capacity_hours`).
    pub daily_capacity_hours: u32,
    /// Weekday that is never a working day.
    pub rest_weekday: Weekday,
    /// Maximum run of consecutive non-working days the span calculator
    /// will skip before giving up.
    pub max_look_ahead_days: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            daily_capacity_hours: DEFAULT_DAILY_CAPACITY_HOURS,
            rest_weekday: Weekday::Fri,
            max_look_ahead_days: DEFAULT_MAX_LOOK_AHEAD_DAYS,
        }
    }
}

impl BoardConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the daily capacity.
    pub fn with_daily_capacity(mut self, hours: u32) -> Self {
        self.daily_capacity_hours = hours;
        self
    }

    /// Sets the weekly rest day.
    pub fn with_rest_weekday(mut self, weekday: Weekday) -> Self {
        self.rest_weekday = weekday;
        self
    }

    /// Sets the look-ahead bound.
    pub fn with_max_look_ahead(mut self, days: u32) -> Self {
        self.max_look_ahead_days = days;
        self
    }

    /// Checks that the configuration can drive a board.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.daily_capacity_hours == 0 || self.daily_capacity_hours > 24 {
            return Err(BoardError::InvalidConfig(format!(
                "daily capacity must be within 1..=24 hours, got {}",
                self.daily_capacity_hours
            )));
        }
        if self.max_look_ahead_days == 0 {
            return Err(BoardError::InvalidConfig(
                "look-ahead must be at least one day".into(),
            ));
        }
        Ok(())
    }
}
