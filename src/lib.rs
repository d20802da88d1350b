pub mod catalog;
pub mod emotions;
pub mod error;
pub mod events;
pub mod models;
pub mod settings;
mod utils;
pub mod windows;

use emotions::{
    commands::{
        add_emotional_entry, check_compassionate_load, check_connection_gap, complete_ecc_stage,
        detect_patterns, disambiguate_emotion, get_emotional_history, get_emotional_snapshot,
        process_emotion, start_ecc_protocol,
    },
    EmotionalConfig, EmotionalController,
};
use events::{forward_to_frontend, Notifier};
use settings::{DesktopSettings, SettingsStore};
use tauri::{Manager, RunEvent, State};
use windows::{
    commands::{
        close_window, focus_window, get_rendered_windows, get_window_snapshot, get_window_status,
        launch_app, list_apps, list_quick_apps, open_window, toggle_maximize, toggle_minimize,
    },
    WindowController,
};

const ENABLE_LOGS: bool = true;

pub(crate) struct AppState {
    pub(crate) windows: WindowController,
    pub(crate) emotions: EmotionalController,
    pub(crate) settings: SettingsStore,
}

#[tauri::command]
fn get_desktop_settings(state: State<AppState>) -> Result<DesktopSettings, String> {
    Ok(state.settings.desktop())
}

#[tauri::command]
async fn update_emotional_config(
    config: EmotionalConfig,
    state: State<'_, AppState>,
) -> Result<DesktopSettings, String> {
    let updated = state
        .settings
        .update_emotional(config.clone())
        .map_err(|err| {
            log_error!("failed to persist emotional config: {err:#}");
            err.to_string()
        })?;

    state.emotions.apply_config(config).await.map_err(|err| {
        log_error!("failed to apply emotional config: {err}");
        err.to_string()
    })?;

    Ok(updated)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Genesis desktop starting up...");

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_store = SettingsStore::new(app_data_dir.join("settings.json"))?;
                let desktop = settings_store.desktop();

                let notifier = Notifier::new();
                forward_to_frontend(app.handle().clone(), &notifier);

                let windows = WindowController::new(notifier.clone(), desktop.base_z_index);
                let emotions = tauri::async_runtime::block_on(EmotionalController::start(
                    desktop.emotional,
                    notifier,
                ));

                app.manage(AppState {
                    windows,
                    emotions,
                    settings: settings_store,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_window_snapshot,
            get_rendered_windows,
            get_window_status,
            open_window,
            close_window,
            focus_window,
            toggle_minimize,
            toggle_maximize,
            list_apps,
            list_quick_apps,
            launch_app,
            get_emotional_snapshot,
            add_emotional_entry,
            process_emotion,
            complete_ecc_stage,
            start_ecc_protocol,
            detect_patterns,
            check_connection_gap,
            check_compassionate_load,
            disambiguate_emotion,
            get_emotional_history,
            get_desktop_settings,
            update_emotional_config,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let RunEvent::Exit = event {
            let Some(state) = app_handle.try_state::<AppState>() else {
                return;
            };
            let emotions = state.emotions.clone();
            if let Err(err) = tauri::async_runtime::block_on(emotions.shutdown()) {
                log_error!("failed to stop emotional decay: {err:#}");
            }
        }
    });
}
