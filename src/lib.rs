pub mod analysis;
pub mod commands;
pub mod error;
pub mod models;

#[cfg(feature = "desktop")]
use commands::ipc::{
    add_custom_channel, estimate_channel_time, finish_wizard, get_actuals, get_admin_report,
    get_channel_targets, get_coach_report, get_consistency, get_global_targets, get_month_actuals,
    get_roadmap, get_state, get_weekly_series, reset_wizard, save_assumptions, toggle_channel,
    update_channel_tracking, update_month,
};

/// Open the persisted store under `config`, falling back to memory when the
/// database cannot be opened, and log today's visit.
pub fn open_store(config: &commands::storage::StoreConfig) -> commands::store::SharedStore {
    use commands::storage::{MemoryStore, SqliteStore};
    use commands::store::{AppStore, SystemClock};

    let storage: Box<dyn commands::storage::KeyValueStore + Send> = match SqliteStore::open(config) {
        Ok(store) => {
            log::info!("state database at {}", config.db_path().display());
            Box::new(store)
        }
        Err(err) => {
            log::warn!("could not open state database, changes will not be saved: {err}");
            Box::new(MemoryStore::new())
        }
    };

    let mut store = AppStore::open(storage, Box::new(SystemClock), &config.storage_key);
    store.touch();
    store.into_shared()
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::storage::StoreConfig;
    use tauri::Manager;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let app_dir = app
                .path()
                .app_data_dir()
                .unwrap_or_else(|_| std::env::temp_dir().join("smartpilot"));
            app.manage(open_store(&StoreConfig::from_env_or(app_dir)));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_state,
            get_global_targets,
            get_channel_targets,
            get_roadmap,
            get_actuals,
            get_month_actuals,
            get_coach_report,
            get_admin_report,
            get_consistency,
            get_weekly_series,
            estimate_channel_time,
            save_assumptions,
            finish_wizard,
            update_month,
            update_channel_tracking,
            reset_wizard,
            add_custom_channel,
            toggle_channel,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
