//! The anchor record every projection starts from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{CycleError, ProfileIssue};

/// Self-reported cycle data, read-only to the engine.
///
/// Lengths are signed so that bad stored values reach validation and are
/// rejected rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleProfile {
    /// First day of the most recently recorded period.
    pub anchor_start: Option<NaiveDate>,
    pub period_length: i64,
    pub cycle_length: i64,
}

impl CycleProfile {
    pub fn new(anchor_start: NaiveDate, period_length: i64, cycle_length: i64) -> Self {
        Self {
            anchor_start: Some(anchor_start),
            period_length,
            cycle_length,
        }
    }

    /// Checks every precondition of the projection math.
    pub fn validate(&self) -> Result<ValidProfile, CycleError> {
        let anchor = self.anchor_start.ok_or(ProfileIssue::MissingAnchor)?;
        if self.cycle_length < 1 {
            return Err(ProfileIssue::NonPositiveCycleLength {
                cycle_length: self.cycle_length,
            }
            .into());
        }
        if self.period_length < 1 {
            return Err(ProfileIssue::NonPositivePeriodLength {
                period_length: self.period_length,
            }
            .into());
        }
        if self.period_length >= self.cycle_length {
            return Err(ProfileIssue::PeriodNotShorterThanCycle {
                period_length: self.period_length,
                cycle_length: self.cycle_length,
            }
            .into());
        }
        Ok(ValidProfile {
            anchor,
            period_length: self.period_length,
            cycle_length: self.cycle_length,
        })
    }
}

/// A profile that passed [`CycleProfile::validate`]:
/// `1 <= period_length < cycle_length` and the anchor is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidProfile {
    anchor: NaiveDate,
    period_length: i64,
    cycle_length: i64,
}

impl ValidProfile {
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn period_length(&self) -> i64 {
        self.period_length
    }

    pub fn cycle_length(&self) -> i64 {
        self.cycle_length
    }
}
