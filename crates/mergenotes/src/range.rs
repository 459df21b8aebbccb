// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Release date ranges
//!
//! A range is either given explicitly as a `--since`/`--until` pair or
//! defaults to the whole previous calendar month.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

/// `strftime` form of `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-range input errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Only one end of the range was given
    #[error("--{given} was given without --{missing}; --since and --until must be given together")]
    Partial {
        /// Flag that was supplied
        given: &'static str,
        /// Flag that was missing
        missing: &'static str,
    },

    /// Value does not look like `YYYY-MM-DD`
    #[error("--{flag} has an invalid format: {value:?}; use YYYY-MM-DD")]
    InvalidFormat {
        /// Offending flag
        flag: &'static str,
        /// Value as supplied
        value: String,
    },

    /// Value has the right shape but is not a calendar date
    #[error("--{flag} is not a valid date: {value:?}")]
    InvalidDate {
        /// Offending flag
        flag: &'static str,
        /// Value as supplied
        value: String,
    },
}

/// An inclusive pair of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    since: NaiveDate,
    until: NaiveDate,
}

impl DateRange {
    /// Create a range from two dates
    #[must_use]
    pub fn new(since: NaiveDate, until: NaiveDate) -> Self {
        Self { since, until }
    }

    /// Resolve optional CLI values into a range
    ///
    /// Both values given: each must be `YYYY-MM-DD`. Neither given: the
    /// previous calendar month relative to `today`.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::Partial` when exactly one value is given, and
    /// `InvalidFormat`/`InvalidDate` for malformed values.
    pub fn resolve(
        since: Option<&str>,
        until: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, RangeError> {
        match (since, until) {
            (Some(since), Some(until)) => Ok(Self::new(
                parse_date("since", since)?,
                parse_date("until", until)?,
            )),
            (Some(_), None) => Err(RangeError::Partial {
                given: "since",
                missing: "until",
            }),
            (None, Some(_)) => Err(RangeError::Partial {
                given: "until",
                missing: "since",
            }),
            (None, None) => Ok(Self::previous_month(today)),
        }
    }

    /// First to last day of the month before `today`'s month
    #[must_use]
    pub fn previous_month(today: NaiveDate) -> Self {
        let until = today - Days::new(u64::from(today.day()));
        let since = until - Days::new(u64::from(until.day() - 1));
        Self { since, until }
    }

    /// Inclusive start
    #[must_use]
    pub fn since(&self) -> NaiveDate {
        self.since
    }

    /// Inclusive end
    #[must_use]
    pub fn until(&self) -> NaiveDate {
        self.until
    }

    /// Start as `YYYY-MM-DD`
    #[must_use]
    pub fn since_str(&self) -> String {
        self.since.format(DATE_FORMAT).to_string()
    }

    /// End as `YYYY-MM-DD`
    #[must_use]
    pub fn until_str(&self) -> String {
        self.until.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.since_str(), self.until_str())
    }
}

/// True if `value` is exactly four digits, dash, two digits, dash, two digits
#[must_use]
pub fn is_date_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_date(flag: &'static str, value: &str) -> Result<NaiveDate, RangeError> {
    if !is_date_shaped(value) {
        return Err(RangeError::InvalidFormat {
            flag,
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| RangeError::InvalidDate {
        flag,
        value: value.to_string(),
    })
}
