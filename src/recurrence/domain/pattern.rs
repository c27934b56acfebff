//! Recurrence pattern value objects and the legacy-to-structured
//! normalization.

use super::{ParseDayOfWeekError, ParseRecurrenceKindError, RecurrenceDomainError};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Recurrence cadence unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    /// Every N days.
    Daily,
    /// Every N weeks, on the configured weekdays.
    Weekly,
    /// Every N months, on the configured day of month.
    Monthly,
    /// User-defined weekday selection; scheduled like `Weekly`.
    Custom,
}

impl RecurrenceKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RecurrenceKind {
    type Error = ParseRecurrenceKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseRecurrenceKindError(value.to_owned())),
        }
    }
}

/// Named weekday used in weekly and custom patterns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayOfWeek {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Converts a `chrono` weekday into the domain representation.
    #[must_use]
    pub const fn from_chrono(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }

    /// Returns the weekday of the given calendar date.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self::from_chrono(date.weekday())
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DayOfWeek {
    type Error = ParseDayOfWeekError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            "sunday" => Ok(Self::Sunday),
            _ => Err(ParseDayOfWeekError(value.to_owned())),
        }
    }
}

/// Structured recurrence pattern shared by tasks and templates.
///
/// Only the fields relevant to the pattern's kind are consulted during
/// scheduling; the others are carried but ignored, tolerating partially
/// filled forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    kind: RecurrenceKind,
    interval: u32,
    #[serde(default)]
    weekdays: BTreeSet<DayOfWeek>,
    #[serde(default)]
    month_day: Option<u8>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    max_instances: Option<u32>,
}

impl RecurrencePattern {
    /// Creates a pattern with the given cadence.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceDomainError::InvalidInterval`] when `interval`
    /// is zero.
    pub fn new(kind: RecurrenceKind, interval: u32) -> Result<Self, RecurrenceDomainError> {
        if interval == 0 {
            return Err(RecurrenceDomainError::InvalidInterval);
        }
        Ok(Self {
            kind,
            interval,
            weekdays: BTreeSet::new(),
            month_day: None,
            end_date: None,
            max_instances: None,
        })
    }

    /// Sets the weekday selection for weekly and custom patterns.
    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = DayOfWeek>) -> Self {
        self.weekdays = weekdays.into_iter().collect();
        self
    }

    /// Sets the day-of-month for monthly patterns.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceDomainError::InvalidMonthDay`] when `day` is
    /// outside 1..=31.
    pub fn with_month_day(mut self, day: u8) -> Result<Self, RecurrenceDomainError> {
        if day == 0 || day > 31 {
            return Err(RecurrenceDomainError::InvalidMonthDay(day));
        }
        self.month_day = Some(day);
        Ok(self)
    }

    /// Sets the date after which no instances are generated.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Caps the total number of generated instances.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceDomainError::InvalidMaxInstances`] when `cap`
    /// is zero.
    pub fn with_max_instances(mut self, cap: u32) -> Result<Self, RecurrenceDomainError> {
        if cap == 0 {
            return Err(RecurrenceDomainError::InvalidMaxInstances);
        }
        self.max_instances = Some(cap);
        Ok(self)
    }

    /// Returns the cadence unit.
    #[must_use]
    pub const fn kind(&self) -> RecurrenceKind {
        self.kind
    }

    /// Returns the "every N units" multiplier; always positive.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Returns the weekday selection.
    #[must_use]
    pub const fn weekdays(&self) -> &BTreeSet<DayOfWeek> {
        &self.weekdays
    }

    /// Returns the day-of-month, if configured.
    #[must_use]
    pub const fn month_day(&self) -> Option<u8> {
        self.month_day
    }

    /// Returns the generation cutoff date, if configured.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the instance cap, if configured.
    #[must_use]
    pub const fn max_instances(&self) -> Option<u32> {
        self.max_instances
    }
}

/// A task's recurrence configuration.
///
/// The data layer carries both the legacy scalar representation and the
/// structured pattern; [`Recurrence::normalize`] is the single place that
/// lowers `Legacy` into `Structured`, so the scheduler only ever operates
/// on one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recurrence {
    /// The task does not recur.
    None,
    /// Legacy scalar `recurrence` + `recurrence_interval` pair.
    Legacy {
        /// Legacy cadence unit.
        kind: RecurrenceKind,
        /// Legacy "every N units" multiplier; zero tolerated, read as 1.
        interval: u32,
    },
    /// Structured recurrence pattern.
    Structured(RecurrencePattern),
}

impl Recurrence {
    /// Lowers this configuration into a structured pattern.
    ///
    /// `reference` anchors the details the legacy fields never carried: a
    /// legacy weekly recurrence falls on the reference date's weekday and
    /// a legacy monthly recurrence on its day-of-month. Returns `None`
    /// for non-recurring tasks.
    #[must_use]
    pub fn normalize(&self, reference: NaiveDate) -> Option<RecurrencePattern> {
        match self {
            Self::None => None,
            Self::Structured(pattern) => Some(pattern.clone()),
            Self::Legacy { kind, interval } => {
                let effective = (*interval).max(1);
                let pattern = RecurrencePattern::new(*kind, effective).ok()?;
                match kind {
                    RecurrenceKind::Daily => Some(pattern),
                    RecurrenceKind::Weekly | RecurrenceKind::Custom => {
                        Some(pattern.with_weekdays([DayOfWeek::of(reference)]))
                    }
                    RecurrenceKind::Monthly => {
                        let day = u8::try_from(reference.day()).unwrap_or(31);
                        pattern.with_month_day(day).ok()
                    }
                }
            }
        }
    }

    /// Returns whether the task recurs at all.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        !matches!(self, Self::None)
    }
}
