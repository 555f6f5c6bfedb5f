//! SQLite-backed store for per-user cycle anchor data.
//!
//! Single writer of the profile; the engine only ever sees a snapshot
//! converted with [`StoredProfile::to_cycle_profile`].

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::ProjectionDefaults;
use crate::cycle::CycleProfile;
use crate::models::{ProfileUpdate, StoredProfile};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
  #[error("Profile not found: {0}")]
  NotFound(String),

  #[error("Database error: {0}")]
  Database(String),
}

impl From<sqlx::Error> for ProfileStoreError {
  fn from(e: sqlx::Error) -> Self {
    ProfileStoreError::Database(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Database Operations
/// ---------------------------------------------------------------------------

pub async fn read_profile(pool: &SqlitePool, user_id: &str) -> Result<StoredProfile, ProfileStoreError> {
  let row = sqlx::query_as::<_, StoredProfile>(
    r#"
    SELECT user_id, last_period_start, period_days, cycle_days, created_at, updated_at
    FROM cycle_profiles
    WHERE user_id = ?1
    "#,
  )
  .bind(user_id)
  .fetch_optional(pool)
  .await?;

  debug!(user_id, found = row.is_some(), "read cycle profile");
  row.ok_or_else(|| ProfileStoreError::NotFound(user_id.to_string()))
}

/// Reads a profile and applies the display defaults in one step.
pub async fn load_cycle_profile(
  pool: &SqlitePool,
  user_id: &str,
  defaults: &ProjectionDefaults,
) -> Result<CycleProfile, ProfileStoreError> {
  let stored = read_profile(pool, user_id).await?;
  Ok(stored.to_cycle_profile(defaults))
}

/// Creates the profile if needed, then overwrites only the supplied fields.
///
/// Blank lengths count as not supplied: the profile form sends `""` for a
/// field the user left untouched.
pub async fn upsert_profile(
  pool: &SqlitePool,
  user_id: &str,
  update: &ProfileUpdate,
) -> Result<StoredProfile, ProfileStoreError> {
  let anchor = update
    .last_period_start
    .map(|d| d.format("%Y-%m-%d").to_string());

  sqlx::query(
    r#"
    INSERT INTO cycle_profiles (user_id, last_period_start, period_days, cycle_days)
    VALUES (?1, ?2, NULLIF(TRIM(?3), ''), NULLIF(TRIM(?4), ''))
    ON CONFLICT(user_id) DO UPDATE SET
      last_period_start = COALESCE(excluded.last_period_start, last_period_start),
      period_days = COALESCE(excluded.period_days, period_days),
      cycle_days = COALESCE(excluded.cycle_days, cycle_days),
      updated_at = CURRENT_TIMESTAMP
    "#,
  )
  .bind(user_id)
  .bind(&anchor)
  .bind(&update.period_days)
  .bind(&update.cycle_days)
  .execute(pool)
  .await?;

  info!(user_id, "cycle profile saved");
  read_profile(pool, user_id).await
}

pub async fn delete_profile(pool: &SqlitePool, user_id: &str) -> Result<(), ProfileStoreError> {
  let result = sqlx::query("DELETE FROM cycle_profiles WHERE user_id = ?1")
    .bind(user_id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(ProfileStoreError::NotFound(user_id.to_string()));
  }
  info!(user_id, "cycle profile deleted");
  Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
