//! Error types for cycle projection.

use serde::Serialize;

/// Why a profile cannot be projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ProfileIssue {
    #[error("last period start date is missing")]
    MissingAnchor,

    #[error("cycle length must be at least 1 day (got {cycle_length})")]
    NonPositiveCycleLength { cycle_length: i64 },

    #[error("period length must be at least 1 day (got {period_length})")]
    NonPositivePeriodLength { period_length: i64 },

    #[error("period length {period_length} must be shorter than cycle length {cycle_length}")]
    PeriodNotShorterThanCycle {
        period_length: i64,
        cycle_length: i64,
    },
}

/// Error type for every projection operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "type", content = "detail")]
pub enum CycleError {
    /// Profile failed validation. Nothing was computed.
    #[error("invalid profile: {0}")]
    InvalidProfile(ProfileIssue),

    /// A month argument that is not a real calendar month.
    #[error("invalid month: {input}")]
    InvalidMonth { input: String },

    /// A projected date fell outside the representable calendar range.
    #[error("projected date out of calendar range (starting from {from})")]
    DateOutOfRange { from: chrono::NaiveDate },
}

impl From<ProfileIssue> for CycleError {
    fn from(issue: ProfileIssue) -> Self {
        CycleError::InvalidProfile(issue)
    }
}
