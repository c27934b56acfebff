//! Shared helpers for recurrence unit tests.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant, keeping calendar assertions
/// deterministic.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Pins the clock to 09:00 UTC on the given date.
    pub fn on(date: NaiveDate) -> Self {
        let time = NaiveTime::from_hms_opt(9, 0, 0).expect("valid fixed time");
        Self {
            now: Utc.from_utc_datetime(&date.and_time(time)),
        }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Shorthand for building calendar dates in assertions.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}
