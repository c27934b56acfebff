//! Pure calendar math deciding whether a pattern falls due on a date.
//!
//! Everything here is deterministic computation over already-fetched
//! data; the scheduler service layers the activity, cutoff, cap, and
//! idempotence guards on top.

use super::{DayOfWeek, RecurrenceKind, RecurrencePattern};
use chrono::{Datelike, NaiveDate};

/// Returns whether `pattern` falls due on `as_of`.
///
/// `anchor` is the template's creation date; `last_generated` the most
/// recent generation date, if any. The more recent of the two is the
/// reference the interval counts from. Dates before the reference are
/// never due.
#[must_use]
pub fn occurs_on(
    pattern: &RecurrencePattern,
    anchor: NaiveDate,
    last_generated: Option<NaiveDate>,
    as_of: NaiveDate,
) -> bool {
    let reference = last_generated.unwrap_or(anchor);
    if as_of < reference {
        return false;
    }
    let interval = i64::from(pattern.interval());

    match pattern.kind() {
        RecurrenceKind::Daily => {
            let days = (as_of - reference).num_days();
            days.rem_euclid(interval) == 0
        }
        RecurrenceKind::Weekly | RecurrenceKind::Custom => {
            pattern.weekdays().contains(&DayOfWeek::of(as_of))
                && (week_index(as_of) - week_index(reference)).rem_euclid(interval) == 0
        }
        RecurrenceKind::Monthly => {
            // A monthly pattern without a day-of-month is a partially
            // filled form; fall back to the reference's day.
            let month_day = pattern
                .month_day()
                .map_or_else(|| reference.day(), u32::from);
            as_of.day() == scheduled_day(as_of.year(), as_of.month(), month_day)
                && months_between(reference, as_of).rem_euclid(interval) == 0
        }
    }
}

/// Returns the day a monthly pattern fires in the given month, clamping
/// `month_day` to the last valid day of shorter months so February and
/// 30-day months are not skipped.
#[must_use]
pub fn scheduled_day(year: i32, month: u32, month_day: u32) -> u32 {
    month_day.min(days_in_month(year, month))
}

/// Returns the number of days in the given month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(28, |last| last.day())
}

/// Monday-aligned week ordinal, so two dates share an index iff they fall
/// in the same ISO week.
fn week_index(date: NaiveDate) -> i64 {
    let days_from_monday = i64::from(date.weekday().num_days_from_monday());
    (i64::from(date.num_days_from_ce()) - days_from_monday).div_euclid(7)
}

/// Whole calendar months between two dates, ignoring the day component.
fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let years = i64::from(to.year()) - i64::from(from.year());
    let months = i64::from(to.month()) - i64::from(from.month());
    years * 12 + months
}
