//! Application configuration read from the environment (and `.env`).

use std::env;
use std::str::FromStr;

use crate::cycle::CalendarHorizon;

/// ---------------------------------------------------------------------------
/// Defaults
/// ---------------------------------------------------------------------------

const DEFAULT_DB_FILE: &str = "cycle-log.db";
const DEFAULT_LOG_FILTER: &str = "cycle_log_lib=info";
const DEFAULT_PERIOD_DAYS: i64 = 5;
const DEFAULT_CYCLE_DAYS: i64 = 28;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value:?}")]
  Invalid { key: String, value: String },
}

/// ---------------------------------------------------------------------------
/// Projection Defaults
/// ---------------------------------------------------------------------------

/// Lengths substituted when a stored profile has no usable value.
///
/// This is a display policy applied before the engine is called; the engine
/// itself never fills in missing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionDefaults {
  pub period_days: i64,
  pub cycle_days: i64,
}

impl Default for ProjectionDefaults {
  fn default() -> Self {
    Self {
      period_days: DEFAULT_PERIOD_DAYS,
      cycle_days: DEFAULT_CYCLE_DAYS,
    }
  }
}

/// ---------------------------------------------------------------------------
/// App Config
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  /// File name of the SQLite database inside the app data directory
  pub db_file: String,
  /// Default `tracing` filter, overridden by `RUST_LOG`
  pub log_filter: String,
  pub horizon: CalendarHorizon,
  pub defaults: ProjectionDefaults,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      db_file: DEFAULT_DB_FILE.to_string(),
      log_filter: DEFAULT_LOG_FILTER.to_string(),
      horizon: CalendarHorizon::default(),
      defaults: ProjectionDefaults::default(),
    }
  }
}

impl AppConfig {
  /// Reads `CYCLE_LOG_*`, `CYCLE_HORIZON_*` and `CYCLE_DEFAULT_*` variables,
  /// falling back to the built-in defaults for anything unset.
  pub fn from_env() -> Result<Self, ConfigError> {
    let fallback = Self::default();

    Ok(Self {
      db_file: env::var("CYCLE_LOG_DB_FILE").unwrap_or(fallback.db_file),
      log_filter: env::var("CYCLE_LOG_LOG_FILTER").unwrap_or(fallback.log_filter),
      horizon: CalendarHorizon {
        months_before: parse_var("CYCLE_HORIZON_MONTHS_BEFORE", fallback.horizon.months_before)?,
        months_after: parse_var("CYCLE_HORIZON_MONTHS_AFTER", fallback.horizon.months_after)?,
      },
      defaults: ProjectionDefaults {
        period_days: parse_positive("CYCLE_DEFAULT_PERIOD_DAYS", fallback.defaults.period_days)?,
        cycle_days: parse_positive("CYCLE_DEFAULT_CYCLE_DAYS", fallback.defaults.cycle_days)?,
      },
    })
  }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
  match env::var(key) {
    Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
      key: key.to_string(),
      value: raw,
    }),
    Err(_) => Ok(default),
  }
}

fn parse_positive(key: &str, default: i64) -> Result<i64, ConfigError> {
  let value = parse_var(key, default)?;
  if value < 1 {
    return Err(ConfigError::Invalid {
      key: key.to_string(),
      value: value.to_string(),
    });
  }
  Ok(value)
}
