//! Error types for calendar-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    /// A bounded field was constructed from a raw value outside its legal range.
    #[error("Invalid {field}: {value} (must be {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Unknown Hebrew month: '{0}'")]
    UnknownMonth(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid payload for '{identifier}': {reason}")]
    InvalidPayload { identifier: String, reason: String },

    #[error("Interval out of range: {0}")]
    IntervalOutOfRange(String),

    #[error("Division by a zero-length interval")]
    DivisionByZero,

    #[error("Illegal Hebrew year length: {0} days")]
    IllegalYearLength(i64),
}

impl CalendarError {
    pub(crate) fn payload(identifier: &str, reason: impl std::fmt::Display) -> Self {
        CalendarError::InvalidPayload {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
