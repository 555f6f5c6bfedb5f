//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Profile fixtures

use crate::cycle::CycleProfile;
use crate::models::ProfileUpdate;
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed a complete profile: anchor 2024-01-01, 5-day period, 28-day cycle
pub async fn seed_test_profile(pool: &SqlitePool, user_id: &str) {
  crate::profile_store::upsert_profile(pool, user_id, &mock_profile_update())
    .await
    .expect("Failed to seed test profile");
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_profile_update() -> ProfileUpdate {
  ProfileUpdate {
    last_period_start: Some(anchor_date()),
    period_days: Some("5".to_string()),
    cycle_days: Some("28".to_string()),
  }
}

/// Engine-level counterpart of [`mock_profile_update`]
pub fn mock_cycle_profile() -> CycleProfile {
  CycleProfile::new(anchor_date(), 5, 28)
}

pub fn anchor_date() -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid fixture date")
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'cycle_profiles'"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_profile_round_trips() {
    let pool = setup_test_db().await;

    seed_test_profile(&pool, "user-1").await;
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cycle_profiles")
      .fetch_one(&pool)
      .await
      .expect("Failed to count profiles");
    assert_eq!(count, 1);

    let loaded = crate::profile_store::load_cycle_profile(
      &pool,
      "user-1",
      &crate::config::ProjectionDefaults::default(),
    )
    .await
    .expect("Should load seeded profile");
    assert_eq!(loaded, mock_cycle_profile());

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_profile_is_valid() {
    let profile = mock_cycle_profile().validate().expect("fixture should validate");
    assert_eq!(profile.cycle_length(), 28);
    assert_eq!(profile.period_length(), 5);
  }
}
