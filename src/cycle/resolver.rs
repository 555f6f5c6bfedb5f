//! Closed-form cycle index resolution.
//!
//! Cycle `n` starts at `anchor + n * cycle_length`. The index of the cycle
//! containing a date is a floor division of the day offset, so dates before
//! the anchor get negative indices and nothing ever steps in a loop.

use chrono::NaiveDate;
use serde::Serialize;

use super::date_math::{days_between, floor_div, shift_days, DateSpan};
use super::error::CycleError;
use super::profile::{CycleProfile, ValidProfile};

/// Days before the next period start at which the fertile band opens.
pub const FERTILE_START_OFFSET_DAYS: i64 = 16;
/// Days before the next period start at which the fertile band closes.
pub const FERTILE_END_OFFSET_DAYS: i64 = 12;

/// Where a date sits within the projected cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CyclePosition {
    pub index: i64,
    pub cycle_start: NaiveDate,
    /// Exclusive end of this cycle, which is also the next period start.
    pub next_cycle_start: NaiveDate,
    /// 1-based, always in `1..=cycle_length`.
    pub day_in_cycle: i64,
}

impl ValidProfile {
    /// `floor((date - anchor) / cycle_length)`.
    pub fn cycle_index(&self, date: NaiveDate) -> i64 {
        floor_div(days_between(self.anchor(), date), self.cycle_length())
    }

    pub fn cycle_start(&self, index: i64) -> Result<NaiveDate, CycleError> {
        let offset = index
            .checked_mul(self.cycle_length())
            .ok_or(CycleError::DateOutOfRange {
                from: self.anchor(),
            })?;
        shift_days(self.anchor(), offset)
    }

    /// Exclusive end of cycle `index`.
    pub fn cycle_end(&self, index: i64) -> Result<NaiveDate, CycleError> {
        let next = index.checked_add(1).ok_or(CycleError::DateOutOfRange {
            from: self.anchor(),
        })?;
        self.cycle_start(next)
    }

    pub fn locate(&self, date: NaiveDate) -> Result<CyclePosition, CycleError> {
        let index = self.cycle_index(date);
        let cycle_start = self.cycle_start(index)?;
        let next_cycle_start = self.cycle_end(index)?;
        Ok(CyclePosition {
            index,
            cycle_start,
            next_cycle_start,
            day_in_cycle: days_between(cycle_start, date) + 1,
        })
    }

    /// Bleeding days of cycle `index`: `[start, start + period_length)`.
    pub fn period_span(&self, index: i64) -> Result<DateSpan, CycleError> {
        let start = self.cycle_start(index)?;
        let last = shift_days(start, self.period_length() - 1)?;
        Ok(DateSpan { first: start, last })
    }

    /// Fertile band belonging to cycle `index`, anchored on the start of
    /// cycle `index + 1`.
    pub fn fertile_span(&self, index: i64) -> Result<DateSpan, CycleError> {
        fertile_span_before(self.cycle_end(index)?)
    }
}

/// `[next_start - 16, next_start - 12]`, independent of cycle length.
pub fn fertile_span_before(next_start: NaiveDate) -> Result<DateSpan, CycleError> {
    let first = shift_days(next_start, -FERTILE_START_OFFSET_DAYS)?;
    let last = shift_days(next_start, -FERTILE_END_OFFSET_DAYS)?;
    Ok(DateSpan { first, last })
}

/// Validates `profile` and locates `today` within its projected cycles.
pub fn resolve_cycle(profile: &CycleProfile, today: NaiveDate) -> Result<CyclePosition, CycleError> {
    profile.validate()?.locate(today)
}
