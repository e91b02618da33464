// Validation errors raised when user preferences are edited
use super::reading::WeatherField;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PreferenceError {
    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(u32),

    #[error("minimum duration must be at least {min} hours, got {got}")]
    DurationTooShort { min: f64, got: f64 },

    #[error("day of week {0} is outside 0 (Sunday) ..= 6 (Saturday)")]
    WeekdayOutOfRange(u8),

    #[error("{field} bound {value} is not a finite number")]
    NonFiniteBound { field: WeatherField, value: f64 },

    #[error("unknown activity {0}")]
    UnknownActivity(String),
}
