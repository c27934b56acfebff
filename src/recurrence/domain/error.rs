//! Error types for recurrence domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing recurrence domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecurrenceDomainError {
    /// The recurrence interval is zero.
    #[error("recurrence interval must be positive")]
    InvalidInterval,

    /// The day-of-month is outside 1..=31.
    #[error("invalid month day {0}, expected 1..=31")]
    InvalidMonthDay(u8),

    /// The instance cap is zero.
    #[error("max instances must be positive")]
    InvalidMaxInstances,

    /// The template name is empty after trimming.
    #[error("template name must not be empty")]
    EmptyTemplateName,
}

/// Error returned while parsing recurrence kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown recurrence kind: {0}")]
pub struct ParseRecurrenceKindError(pub String);

/// Error returned while parsing weekday names from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown weekday: {0}")]
pub struct ParseDayOfWeekError(pub String);
