pub mod cycle;
pub mod profile;

use crate::db::AppState;
use std::sync::Arc;
use tauri::State;

/// Ids of every stored profile, most recently updated first
#[tauri::command]
pub async fn list_profile_users(
  state: State<'_, Arc<AppState>>,
) -> Result<Vec<String>, String> {
  sqlx::query_scalar::<_, String>(
    "SELECT user_id FROM cycle_profiles ORDER BY updated_at DESC"
  )
  .fetch_all(&state.db)
  .await
  .map_err(|e| format!("Failed to fetch profiles: {}", e))
}
