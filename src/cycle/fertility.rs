//! Fertility window before the next projected period.
//!
//! Fixed-offset heuristic: the window is `[P - 16, P - 12]` for next start
//! `P`, whatever the cycle length. Not a physiological model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::CycleError;
use super::profile::CycleProfile;
use super::resolver::fertile_span_before;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilityWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FertilityWindow {
    /// Window preceding a period that starts on `next_period_start`.
    pub fn before(next_period_start: NaiveDate) -> Result<Self, CycleError> {
        let span = fertile_span_before(next_period_start)?;
        Ok(Self {
            start: span.first(),
            end: span.last(),
        })
    }
}

/// Window before the next period after `today`.
pub fn fertility_window(profile: &CycleProfile, today: NaiveDate) -> Result<FertilityWindow, CycleError> {
    let position = profile.validate()?.locate(today)?;
    FertilityWindow::before(position.next_cycle_start)
}
