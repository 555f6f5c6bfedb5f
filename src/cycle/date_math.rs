//! Whole-day calendar arithmetic shared by every projection.
//!
//! All offsets are checked: a shift that leaves chrono's representable
//! range becomes [`CycleError::DateOutOfRange`] instead of a panic.

use chrono::{Duration, Months, NaiveDate};

use super::error::CycleError;

/// Signed number of whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Moves `date` by `days` (negative moves backwards).
pub fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, CycleError> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or(CycleError::DateOutOfRange { from: date })
}

/// Moves `date` by whole calendar months, clamping the day to the target
/// month's length (Jan 31 + 1 month = Feb 28/29).
pub fn shift_months(date: NaiveDate, months: i32) -> Result<NaiveDate, CycleError> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.ok_or(CycleError::DateOutOfRange { from: date })
}

/// Floor division for a positive divisor.
pub fn floor_div(value: i64, divisor: i64) -> i64 {
    value.div_euclid(divisor)
}

/// Ceiling division for a positive divisor.
pub fn ceil_div(value: i64, divisor: i64) -> i64 {
    -(-value).div_euclid(divisor)
}

// ---------------------------------------------------------------------------
/// Inclusive span of calendar days
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateSpan {
    pub(super) first: NaiveDate,
    pub(super) last: NaiveDate,
}

impl DateSpan {
    /// `None` when `last` precedes `first`.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        (first <= last).then_some(Self { first, last })
    }

    pub fn first(self) -> NaiveDate {
        self.first
    }

    pub fn last(self) -> NaiveDate {
        self.last
    }

    /// Overlap of two spans, if any.
    pub fn clip(self, other: DateSpan) -> Option<DateSpan> {
        DateSpan::new(self.first.max(other.first), self.last.min(other.last))
    }

    /// Every day of the span in ascending order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        self.first.iter_days().take_while(move |d| *d <= last)
    }
}
