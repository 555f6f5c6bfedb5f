use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ProjectionDefaults;
use crate::cycle::CycleProfile;

/// Cycle fields as stored, before any defaults are applied.
///
/// The profile form submits free text, so lengths are kept as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredProfile {
  pub user_id: String,
  pub last_period_start: Option<String>,
  pub period_days: Option<String>,
  pub cycle_days: Option<String>,
  pub created_at: Option<String>,
  pub updated_at: Option<String>,
}

/// Partial update: only `Some` fields overwrite stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
  pub last_period_start: Option<NaiveDate>,
  pub period_days: Option<String>,
  pub cycle_days: Option<String>,
}

impl StoredProfile {
  /// Build the engine input, substituting defaults for unusable lengths.
  ///
  /// Missing, non-numeric or zero lengths take the default. Negative values
  /// are kept so validation rejects them. An unreadable date leaves the
  /// anchor empty.
  pub fn to_cycle_profile(&self, defaults: &ProjectionDefaults) -> CycleProfile {
    CycleProfile {
      anchor_start: self.last_period_start.as_deref().and_then(parse_anchor),
      period_length: length_or(self.period_days.as_deref(), defaults.period_days),
      cycle_length: length_or(self.cycle_days.as_deref(), defaults.cycle_days),
    }
  }
}

fn parse_anchor(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  // Older rows hold a full timestamp; the calendar day is the first 10 chars
  let day = raw.get(..10).unwrap_or(raw);
  NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn length_or(raw: Option<&str>, default: i64) -> i64 {
  match raw.and_then(leading_integer) {
    Some(0) | None => default,
    Some(days) => days,
  }
}

/// Leading (optionally signed) integer of `raw`, so `"28 days"` reads as 28.
fn leading_integer(raw: &str) -> Option<i64> {
  let trimmed = raw.trim_start();
  let (sign, digits) = match trimmed.strip_prefix('-') {
    Some(rest) => (-1, rest),
    None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
  };
  let end = digits
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(digits.len());
  digits[..end].parse::<i64>().ok().map(|value| sign * value)
}
