// countdown.rs: Days remaining until a fixed target date.
//
// The count is the ceiling of the exact difference expressed in days, so a
// target 1 hour away still reports 1 day left. Once the target has passed the
// count goes negative; callers decide whether to show that.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::CountdownError;

/// The target date used when nothing else is configured.
pub const DEFAULT_TARGET_DATE: &str = "2026-01-01";

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Number of whole days from `now` until `target`, with partial days rounded up.
///
/// Works at millisecond precision. Integer division in Rust truncates toward
/// zero, which is already the ceiling for negative values, so only a positive
/// remainder needs an extra day.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (target - now).num_milliseconds();
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// A countdown towards a single, fixed target instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target: DateTime<Utc>,
}

impl Countdown {
    /// Count down to an exact instant.
    pub fn new(target: DateTime<Utc>) -> Self {
        Self { target }
    }

    /// Count down to midnight UTC at the start of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Parse a `YYYY-MM-DD` target date.
    pub fn parse(input: &str) -> Result<Self, CountdownError> {
        let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|source| {
            CountdownError::InvalidDate {
                input: input.to_string(),
                source,
            }
        })?;
        Ok(Self::from_date(date))
    }

    /// The instant being counted down to.
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Days left as seen from `now`.
    pub fn days_left(&self, now: DateTime<Utc>) -> i64 {
        days_until(self.target, now)
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::from_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default())
    }
}
