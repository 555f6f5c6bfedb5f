//! Tauri commands for cycle projection
//!
//! Each command reads one profile snapshot, applies the display defaults,
//! and hands it to the engine. `today` may be passed by the UI as
//! `YYYY-MM-DD`; otherwise the local calendar date is used.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;
use tauri::State;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::cycle::{
    calendar_tags, classify_phase, fertility_window, is_in_period as engine_is_in_period,
    next_period_date, period_status, CycleError, CycleProfile, FertilityWindow, PeriodStatus, PhaseLabel,
    TaggedDay, YearMonth,
};
use crate::db::AppState;
use crate::profile_store::load_cycle_profile;

// ---------------------------------------------------------------------------
/// Shared helpers
// ---------------------------------------------------------------------------

/// Parse an optional `YYYY-MM-DD` from the UI, falling back to the local date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate, String> {
    match today {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| format!("Invalid date {:?}: {}", raw, e)),
        None => Ok(Local::now().date_naive()),
    }
}

async fn snapshot(pool: &SqlitePool, config: &AppConfig, user_id: &str) -> Result<CycleProfile, String> {
    load_cycle_profile(pool, user_id, &config.defaults)
        .await
        .map_err(|e| e.to_string())
}

fn log_failure<T, E: std::fmt::Display>(op: &str, user_id: &str, result: Result<T, E>) -> Result<T, String> {
    result.map_err(|e| {
        warn!(op, user_id, error = %e, "cycle projection failed");
        e.to_string()
    })
}

// ---------------------------------------------------------------------------
/// Overview: everything the home screen shows, from one snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleOverview {
    pub today: NaiveDate,
    pub phase: PhaseLabel,
    pub status: PeriodStatus,
    pub fertility_window: FertilityWindow,
    pub next_period_date: NaiveDate,
}

pub async fn load_overview(
    pool: &SqlitePool,
    config: &AppConfig,
    user_id: &str,
    today: NaiveDate,
) -> Result<CycleOverview, String> {
    let profile = snapshot(pool, config, user_id).await?;
    log_failure("overview", user_id, project_overview(&profile, today))
}

fn project_overview(profile: &CycleProfile, today: NaiveDate) -> Result<CycleOverview, CycleError> {
    Ok(CycleOverview {
        today,
        phase: classify_phase(profile, today)?,
        status: period_status(profile, today)?,
        fertility_window: fertility_window(profile, today)?,
        next_period_date: next_period_date(profile, today)?,
    })
}

pub async fn load_calendar_tags(
    pool: &SqlitePool,
    config: &AppConfig,
    user_id: &str,
    month: &str,
    today: NaiveDate,
) -> Result<Vec<TaggedDay>, String> {
    let profile = snapshot(pool, config, user_id).await?;
    let tags = profile
        .validate()
        .and_then(|_| month.parse::<YearMonth>())
        .and_then(|month| calendar_tags(&profile, month, today, config.horizon));
    let tags = log_failure("calendar_tags", user_id, tags)?;
    debug!(user_id, month, tagged_days = tags.len(), "calendar tags computed");
    Ok(tags)
}

// ---------------------------------------------------------------------------
/// Commands
// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn get_current_phase(
    state: State<'_, Arc<AppState>>,
    user_id: String,
    today: Option<String>,
) -> Result<PhaseLabel, String> {
    let today = resolve_today(today.as_deref())?;
    let profile = snapshot(&state.db, &state.config, &user_id).await?;
    log_failure("phase", &user_id, classify_phase(&profile, today))
}

#[tauri::command]
pub async fn get_period_status(
    state: State<'_, Arc<AppState>>,
    user_id: String,
    today: Option<String>,
) -> Result<PeriodStatus, String> {
    let today = resolve_today(today.as_deref())?;
    let profile = snapshot(&state.db, &state.config, &user_id).await?;
    log_failure("period_status", &user_id, period_status(&profile, today))
}

#[tauri::command]
pub async fn get_fertility_window(
    state: State<'_, Arc<AppState>>,
    user_id: String,
    today: Option<String>,
) -> Result<FertilityWindow, String> {
    let today = resolve_today(today.as_deref())?;
    let profile = snapshot(&state.db, &state.config, &user_id).await?;
    log_failure("fertility_window", &user_id, fertility_window(&profile, today))
}

#[tauri::command]
pub async fn get_next_period_date(
    state: State<'_, Arc<AppState>>,
    user_id: String,
    today: Option<String>,
) -> Result<NaiveDate, String> {
    let today = resolve_today(today.as_deref())?;
    let profile = snapshot(&state.db, &state.config, &user_id).await?;
    log_failure("next_period_date", &user_id, next_period_date(&profile, today))
}

#[tauri::command]
pub async fn is_in_period(
    state: State<'_, Arc<AppState>>,
    user_id: String,
    today: Option<String>,
) -> Result<bool, String> {
    let today = resolve_today(today.as_deref())?;
    let profile = snapshot(&state.db, &state.config, &user_id).await?;
    log_failure("is_in_period", &user_id, engine_is_in_period(&profile, today))
}

/// `month` is `YYYY-MM`
#[tauri::command]
pub async fn get_calendar_tags(
    state: State<'_, Arc<AppState>>,
    user_id: String,
    month: String,
    today: Option<String>,
) -> Result<Vec<TaggedDay>, String> {
    let today = resolve_today(today.as_deref())?;
    load_calendar_tags(&state.db, &state.config, &user_id, &month, today).await
}

#[tauri::command]
pub async fn get_cycle_overview(
    state: State<'_, Arc<AppState>>,
    user_id: String,
    today: Option<String>,
) -> Result<CycleOverview, String> {
    let today = resolve_today(today.as_deref())?;
    load_overview(&state.db, &state.config, &user_id, today).await
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
