//! Wall-clock input and the dial positions derived from it.

use serde::{Deserialize, Serialize};

/// Positions around the dial for the minute and second hands
pub const DIAL_POSITIONS: i32 = 60;

/// Positions around the dial for the hour hand (six per hour)
pub const HOUR_POSITIONS: i32 = 72;

/// Local wall-clock time as delivered by the host.
///
/// Fields are normalised into range on construction, so a bad host value
/// shifts a hand instead of indexing out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockTime {
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0 = Sunday
    pub weekday: u8,
}

impl ClockTime {
    /// Time of day on 1 January (a Sunday placeholder).
    pub fn hms(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
            month: 1,
            day: 1,
            weekday: 0,
        }
    }

    pub fn with_date(mut self, month: u8, day: u8, weekday: u8) -> Self {
        self.month = month.clamp(1, 12);
        self.day = day.clamp(1, 31);
        self.weekday = weekday % 7;
        self
    }

    /// Whether the PM indicator should be shown.
    pub fn is_pm(&self) -> bool {
        self.hour >= 12
    }
}

/// Where each hand points, in dial positions.
///
/// `hour` counts 0..[`HOUR_POSITIONS`]; `minute` and `second` count
/// 0..[`DIAL_POSITIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandPositions {
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

impl HandPositions {
    /// Live positions for `time`. The hour hand advances one position every
    /// ten minutes.
    pub fn from_time(time: &ClockTime) -> Self {
        Self {
            hour: i32::from(time.hour % 12) * 6 + i32::from(time.minute) / 10,
            minute: i32::from(time.minute),
            second: i32::from(time.second),
        }
    }
}
