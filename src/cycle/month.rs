//! Display month: a year and month with no day component.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::date_math::DateSpan;
use super::error::CycleError;

/// A calendar month, serialized as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first: NaiveDate,
    last: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CycleError> {
        let invalid = || CycleError::InvalidMonth {
            input: format!("{:04}-{:02}", year, month),
        };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = (28..=31)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .ok_or_else(invalid)?;
        Ok(Self { first, last })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = (28..=31)
            .rev()
            .find_map(|day| date.with_day(day))
            .unwrap_or(date);
        Self { first, last }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn last_day(self) -> NaiveDate {
        self.last
    }

    pub fn days_in_month(self) -> u32 {
        self.last.day()
    }

    pub fn span(self) -> DateSpan {
        DateSpan {
            first: self.first,
            last: self.last,
        }
    }

    /// The following month, `None` past the end of the calendar.
    pub fn succ(self) -> Option<Self> {
        self.last.succ_opt().map(Self::containing)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = CycleError;

    /// Parses `"YYYY-MM"`: exactly four year digits and two month digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CycleError::InvalidMonth {
            input: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if !all_digits(year, 4) || !all_digits(month, 2) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

fn all_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

impl TryFrom<String> for YearMonth {
    type Error = CycleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}
