//! Period status: "Period day N" or "N days until next period".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date_math::days_between;
use super::error::CycleError;
use super::profile::CycleProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStatus {
    pub on_period: bool,
    /// Day of the period when `on_period`, otherwise days until the next one.
    pub days_count: i64,
    pub message: String,
}

impl PeriodStatus {
    fn on_period(day: i64) -> Self {
        Self {
            on_period: true,
            days_count: day,
            message: format!("Period day {}", day),
        }
    }

    fn upcoming(days_until: i64) -> Self {
        Self {
            on_period: false,
            days_count: days_until,
            message: "days until\nnext period".to_string(),
        }
    }
}

pub fn period_status(profile: &CycleProfile, today: NaiveDate) -> Result<PeriodStatus, CycleError> {
    let valid = profile.validate()?;
    let position = valid.locate(today)?;

    if position.day_in_cycle <= valid.period_length() {
        return Ok(PeriodStatus::on_period(position.day_in_cycle));
    }

    // The containing cycle came from a floor, so its end is the next start.
    Ok(PeriodStatus::upcoming(days_between(today, position.next_cycle_start)))
}

pub fn is_in_period(profile: &CycleProfile, today: NaiveDate) -> Result<bool, CycleError> {
    period_status(profile, today).map(|status| status.on_period)
}

/// Start of the first projected period strictly after `today`.
pub fn next_period_date(profile: &CycleProfile, today: NaiveDate) -> Result<NaiveDate, CycleError> {
    Ok(profile.validate()?.locate(today)?.next_cycle_start)
}
