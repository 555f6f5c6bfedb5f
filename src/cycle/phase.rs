//! Phase classification for a day within a cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::CycleError;
use super::profile::CycleProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl Phase {
    /// Classifies a 1-based `day_in_cycle`.
    ///
    /// Thresholds scale with the cycle: follicular ends at 30% of the cycle,
    /// ovulation at 50%. A day exactly on a threshold belongs to the later
    /// phase. The comparisons are done in integers (`10d < 3L`, `2d < L`) so
    /// no float rounding can move a boundary.
    pub fn for_day(day_in_cycle: i64, period_length: i64, cycle_length: i64) -> Self {
        if day_in_cycle <= period_length {
            Phase::Menstrual
        } else if 10 * day_in_cycle < 3 * cycle_length {
            Phase::Follicular
        } else if 2 * day_in_cycle < cycle_length {
            Phase::Ovulation
        } else {
            Phase::Luteal
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Menstrual => "Menstrual Phase",
            Phase::Follicular => "Follicular Phase",
            Phase::Ovulation => "Ovulation Phase",
            Phase::Luteal => "Luteal Phase",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Phase::Menstrual => "#FF4D6D",
            Phase::Follicular => "#C77DFF",
            Phase::Ovulation => "#FFD166",
            Phase::Luteal => "#F8A978",
        }
    }

    pub fn label(self) -> PhaseLabel {
        PhaseLabel {
            phase: self,
            name: self.display_name(),
            color: self.color(),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Phase plus its display attributes, as sent to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseLabel {
    pub phase: Phase,
    pub name: &'static str,
    pub color: &'static str,
}

/// Current phase for `today`.
pub fn classify_phase(profile: &CycleProfile, today: NaiveDate) -> Result<PhaseLabel, CycleError> {
    let valid = profile.validate()?;
    let position = valid.locate(today)?;
    Ok(Phase::for_day(position.day_in_cycle, valid.period_length(), valid.cycle_length()).label())
}
