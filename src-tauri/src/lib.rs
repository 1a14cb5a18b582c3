pub mod commands;
pub mod config;
pub mod state;

use crate::config::DesktopConfig;
use crate::state::AppState;
use regwatch_core::mock;
use regwatch_core::store::SqliteStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn build_state(config: &DesktopConfig) -> Result<AppState, String> {
    let store = SqliteStore::open(&config.db_path).map_err(|e| e.to_string())?;
    let reports = config.load_reports()?;
    tracing::info!(reports = reports.len(), db = %config.db_path.display(), "loaded report data");

    Ok(AppState {
        reports: Arc::new(reports),
        descriptors: Arc::new(mock::card_descriptors()),
        store: Arc::new(store),
    })
}

pub fn run(config: &DesktopConfig) -> Result<(), String> {
    let state = build_state(config)?;
    let filters = commands::get_filter_args(&state)?;
    tracing::info!(
        reports = state.reports.len(),
        filters_modified = !filters.is_default(),
        "backend ready; build with --features tauri-app for the desktop window"
    );
    Ok(())
}

#[cfg(feature = "tauri-app")]
pub fn run_tauri(config: DesktopConfig) {
    tauri::Builder::default()
        .setup(move |app| {
            use tauri::Manager;

            let state = build_state(&config).map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::list_reports_cmd,
            commands::list_card_descriptors_cmd,
            commands::get_filter_args_cmd,
            commands::save_filter_args_cmd,
            commands::dashboard_snapshot_cmd
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

pub fn run_demo(config: &DesktopConfig, selected: Option<String>) -> Result<(), String> {
    let state = build_state(config)?;
    let snapshot = commands::dashboard_snapshot(&state, selected, config.now())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?
    );
    Ok(())
}
