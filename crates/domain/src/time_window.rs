//! Time-window policy: when a toggle should power the output directly.
//!
//! Power is cheap all weekend and during the weekday happy hour. In those
//! windows a toggle acts on the output immediately instead of arming the
//! scheduled fire.

use chrono::{Datelike, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::LocalTime;

/// Classification of the current wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Weekend,
    HappyHourImmediate,
    Normal,
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weekend => f.write_str("weekend"),
            Self::HappyHourImmediate => f.write_str("happy_hour"),
            Self::Normal => f.write_str("normal"),
        }
    }
}

/// Inclusive hour range, possibly wrapping past midnight (e.g. 23–2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HappyHours {
    start_hour: u32,
    end_hour: u32,
}

impl HappyHours {
    /// Default low-tariff window: 23:00 through 02:59.
    pub const DEFAULT: Self = Self {
        start_hour: 23,
        end_hour: 2,
    };

    /// Build a range from inclusive start and end hours.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::HourOutOfRange`] if either hour exceeds 23.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ValidationError> {
        for hour in [start_hour, end_hour] {
            if hour > 23 {
                return Err(ValidationError::HourOutOfRange(hour));
            }
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    #[must_use]
    pub fn start_hour(self) -> u32 {
        self.start_hour
    }

    #[must_use]
    pub fn end_hour(self) -> u32 {
        self.end_hour
    }

    /// Whether `hour` falls inside the range.
    #[must_use]
    pub fn contains(self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            (self.start_hour..=self.end_hour).contains(&hour)
        } else {
            hour >= self.start_hour || hour <= self.end_hour
        }
    }
}

impl Default for HappyHours {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Weekend days plus happy hours; weekend takes precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowPolicy {
    weekend_days: Vec<Weekday>,
    happy_hours: HappyHours,
}

impl WindowPolicy {
    #[must_use]
    pub fn new(weekend_days: Vec<Weekday>, happy_hours: HappyHours) -> Self {
        Self {
            weekend_days,
            happy_hours,
        }
    }

    #[must_use]
    pub fn weekend_days(&self) -> &[Weekday] {
        &self.weekend_days
    }

    #[must_use]
    pub fn happy_hours(&self) -> HappyHours {
        self.happy_hours
    }

    /// Classify a day and hour.
    #[must_use]
    pub fn classify(&self, weekday: Weekday, hour: u32) -> TimeWindow {
        if self.weekend_days.contains(&weekday) {
            TimeWindow::Weekend
        } else if self.happy_hours.contains(hour) {
            TimeWindow::HappyHourImmediate
        } else {
            TimeWindow::Normal
        }
    }

    /// Classify a local wall-clock reading.
    #[must_use]
    pub fn classify_at(&self, at: &LocalTime) -> TimeWindow {
        self.classify(at.weekday(), at.hour())
    }
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self::new(vec![Weekday::Sat, Weekday::Sun], HappyHours::DEFAULT)
    }
}
