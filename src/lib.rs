// Learn more about Tauri commands at https://tauri.app/develop/calling-rust/

mod commands;
pub mod composer;
pub mod config;
pub mod display;
pub mod llm;
pub mod preferences;
pub mod session;

use crate::commands::*;
use crate::config::AppConfig;
use crate::display::ViewState;
use crate::llm::GeminiClient;
use std::sync::Arc;
use tauri::{Emitter, Manager};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lyricist_lib=info"));
    // A second init (tests, hot reload) is harmless.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AppConfig::load().unwrap_or_else(|e| {
        error!(error = %e, "Invalid configuration, falling back to defaults");
        AppConfig::default()
    });
    info!(model = %config.generation.model, "Starting lyricist");

    let generator = Arc::new(GeminiClient::new(config.generation));

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(AppState::new(generator))
        .setup(|app| {
            forward_state_events(app.handle());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_preferences,
            update_preference,
            apply_structure,
            get_catalog,
            generate_lyrics,
            get_view,
            copy_lyrics
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Pushes preference and generation changes to the webview as events.
fn forward_state_events(app: &tauri::AppHandle) {
    let state = app.state::<AppState>();

    let mut prefs_rx = state.preferences.subscribe();
    let handle = app.clone();
    tauri::async_runtime::spawn(async move {
        while prefs_rx.changed().await.is_ok() {
            let prefs = prefs_rx.borrow_and_update().clone();
            if let Err(e) = handle.emit(PREFERENCES_CHANGED, prefs) {
                warn!(error = %e, "Failed to emit preference update");
            }
        }
    });

    let mut session_rx = state.session.subscribe();
    let indicator = state.indicator.clone();
    let handle = app.clone();
    tauri::async_runtime::spawn(async move {
        while session_rx.changed().await.is_ok() {
            let current = session_rx.borrow_and_update().clone();
            emit_view(&handle, ViewState::from_state(&current, indicator.is_copied()));
        }
    });
}
