//! Calendar date keys.
//!
//! # Responsibility
//! - Represent one local calendar day as the `YYYY-MM-DD` key used for
//!   task completion dates, streak continuity and quote cache entries.
//!
//! # Invariants
//! - Serialized form is always exactly ten characters, `YYYY-MM-DD`.
//! - Equality and ordering follow the calendar, not the string.

use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
const DATE_KEY_LEN: usize = 10;

/// One calendar day in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

/// Error returned when a string is not a valid date key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateKeyParseError {
    input: String,
}

impl Display for DateKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date key `{}`; expected YYYY-MM-DD", self.input)
    }
}

impl Error for DateKeyParseError {}

impl DateKey {
    /// Returns the key for the current local calendar day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Builds a key from year/month/day, `None` when the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Calendar day after this one.
    ///
    /// Saturates at the maximum representable date.
    pub fn next_day(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    /// Returns whether `self` is exactly one calendar day after `other`.
    pub fn is_day_after(&self, other: DateKey) -> bool {
        other.0.succ_opt() == Some(self.0)
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyParseError;

    /// Accepts a bare `YYYY-MM-DD` key or an ISO-8601 timestamp, which is
    /// truncated to its date component.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let date_part = match trimmed.get(..DATE_KEY_LEN) {
            Some(head) if trimmed.len() == DATE_KEY_LEN => head,
            Some(head) if trimmed[DATE_KEY_LEN..].starts_with('T') => head,
            _ => {
                return Err(DateKeyParseError {
                    input: value.to_string(),
                })
            }
        };

        NaiveDate::parse_from_str(date_part, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DateKeyParseError {
                input: value.to_string(),
            })
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
