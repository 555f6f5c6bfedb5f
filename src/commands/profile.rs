//! Tauri commands for the cycle profile

use std::sync::Arc;
use tauri::State;

use crate::db::AppState;
use crate::models::{ProfileUpdate, StoredProfile};
use crate::profile_store::{delete_profile, read_profile, upsert_profile};

/// Get the stored profile exactly as entered
#[tauri::command]
pub async fn get_cycle_profile(
  state: State<'_, Arc<AppState>>,
  user_id: String,
) -> Result<StoredProfile, String> {
  read_profile(&state.db, &user_id)
    .await
    .map_err(|e| e.to_string())
}

/// Merge the supplied fields into the profile, creating it if needed
#[tauri::command]
pub async fn update_cycle_profile(
  state: State<'_, Arc<AppState>>,
  user_id: String,
  update: ProfileUpdate,
) -> Result<StoredProfile, String> {
  upsert_profile(&state.db, &user_id, &update)
    .await
    .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_cycle_profile(
  state: State<'_, Arc<AppState>>,
  user_id: String,
) -> Result<(), String> {
  delete_profile(&state.db, &user_id)
    .await
    .map_err(|e| e.to_string())
}
