pub mod cycle;

mod commands;
mod config;
mod db;
mod logging;
mod models;
mod profile_store;

#[cfg(test)]
mod test_utils;

use config::AppConfig;
use db::AppState;
use std::sync::Arc;
use tauri::Manager;
use tracing::{error, info, warn};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let loaded = AppConfig::from_env();
  let config = match &loaded {
    Ok(config) => config.clone(),
    Err(_) => AppConfig::default(),
  };
  logging::init(&config.log_filter);
  if let Err(e) = loaded {
    warn!(error = %e, "invalid configuration, using defaults");
  }

  tauri::Builder::default()
    .setup(move |app| {
      // Initialize database
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle, &config).await {
          Ok(pool) => {
            let state = Arc::new(AppState { db: pool, config });
            app_handle.manage(state);
            info!("database ready");
          }
          Err(e) => {
            error!(error = %e, "failed to initialize database");
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      commands::list_profile_users,
      // Profile commands
      commands::profile::get_cycle_profile,
      commands::profile::update_cycle_profile,
      commands::profile::delete_cycle_profile,
      // Projection commands
      commands::cycle::get_current_phase,
      commands::cycle::get_period_status,
      commands::cycle::get_fertility_window,
      commands::cycle::get_next_period_date,
      commands::cycle::is_in_period,
      commands::cycle::get_calendar_tags,
      commands::cycle::get_cycle_overview,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
