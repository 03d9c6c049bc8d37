mod commands;
mod events;
mod logging;
#[cfg(unix)]
mod signals;
mod window;

use logging::setup_logging;

#[cfg(test)]
mod tests;

use shell_config::{CONFIG_FILENAME, ShellConfig};
use shell_sidecar::{LifecycleController, ProcessSupervisor, SupervisorOptions};
use shell_state::{WindowGeometry, WindowStateStore};

use std::path::PathBuf;
use std::sync::Arc;

use tauri::{AppHandle, Manager, RunEvent};
use tracing::info;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";

// Tauri event names (must match the frontend page)
pub(crate) const EVENT_BACKEND_STATE_CHANGED: &str = "backend-state-changed";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            // Focus existing window on second instance attempt
            window::focus_main_window(app);
        }))
        .setup(|app| {
            let config_dir = match app.path().app_config_dir() {
                Ok(dir) => dir,
                Err(_) => ShellConfig::default_config_dir()?,
            };
            let first_run = !config_dir.join(CONFIG_FILENAME).exists();
            let loaded = ShellConfig::load_or_create(&config_dir);

            // Logging must be up before env overrides and validation run, both report through it
            let logging = loaded
                .as_ref()
                .map(|config| config.logging.clone())
                .unwrap_or_default();
            let log_dir = app.path().app_log_dir()?.join(&logging.directory);
            setup_logging(&log_dir, &logging)?;

            info!("Starting Sidecar Shell v{}", env!("CARGO_PKG_VERSION"));
            info!("Config directory: {}", config_dir.display());
            info!("Log directory: {}", log_dir.display());
            if first_run && loaded.is_ok() {
                info!("Wrote default config to {}", config_dir.join(CONFIG_FILENAME).display());
            }

            let config = ShellConfig::resolve(loaded);
            config.log_summary();

            let backend_dir = backend_dir(app);
            info!("Backend directory: {}", backend_dir.display());

            let runtime = tauri::async_runtime::handle().inner().clone();

            let fallback =
                WindowGeometry::new(config.window.default_width, config.window.default_height)
                    .unwrap_or_default();
            let store = Arc::new(WindowStateStore::new(
                config_dir.join(&config.window.state_file),
                config.window.debounce(),
                fallback,
                runtime.clone(),
            ));
            app.manage(store);

            let supervisor = ProcessSupervisor::new(
                SupervisorOptions::from_config(&config, &backend_dir, &log_dir),
                &runtime,
            );
            events::forward_state_changes(app.handle().clone(), supervisor.subscribe());
            app.manage(Arc::new(LifecycleController::new(supervisor)));

            #[cfg(unix)]
            signals::install(app.handle().clone());

            window::open_main_window(app.handle())?;

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![commands::get_backend_status])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { api, code, .. } => {
                info!("Exit requested (code: {code:?})");
                api.prevent_exit();

                stop_backend(app_handle);

                std::process::exit(code.unwrap_or(0));
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen {
                has_visible_windows,
                ..
            } => {
                if !has_visible_windows {
                    window::focus_main_window(app_handle);
                }
            }
            _ => {}
        });
}

/// Directory holding the backend script and bundled venv.
fn backend_dir(app: &tauri::App) -> PathBuf {
    app.path()
        .resource_dir()
        .or_else(|_| std::env::current_dir())
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Request backend shutdown on the way out. Safe to call from several exit paths.
pub(crate) fn stop_backend(app: &AppHandle) {
    let Some(lifecycle) = app.try_state::<Arc<LifecycleController>>() else {
        return;
    };
    let lifecycle = lifecycle.inner().clone();

    tauri::async_runtime::block_on(async move {
        lifecycle.on_exit_requested().await;
    });
}
