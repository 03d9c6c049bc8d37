mod backend_settings;
mod config;
mod error;
mod logging_settings;
mod restart_settings;
mod window_settings;

pub use backend_settings::BackendSettings;
pub use config::ShellConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use logging_settings::LoggingSettings;
pub use restart_settings::RestartSettings;
pub use window_settings::WindowSettings;

#[cfg(test)]
mod tests;

/// Configuration version for migration support.
/// Increment when adding new fields or changing structure.
pub const CONFIG_VERSION: u32 = 1;

pub const CONFIG_FILENAME: &str = "config.toml";
pub const APP_DIR_NAME: &str = "sidecar-shell";

pub const ENV_PYTHON: &str = "PYTHON";
pub const ENV_SERVER_PORT: &str = "PY_SERVER_PORT";
pub const ENV_LOG_LEVEL: &str = "SHELL_LOG_LEVEL";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_SCRIPT: &str = "pythonServer.py";
const DEFAULT_VENV_DIR: &str = "venv";
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 500;
const DEFAULT_SHUTDOWN_PATH: &str = "/shutdown";
const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 2000;
const DEFAULT_ERROR_LOG_FILE: &str = "backend-error.log";

const DEFAULT_RESTART_ENABLED: bool = true;
const DEFAULT_RESTART_DELAY_MS: u64 = 5000;

const DEFAULT_STATE_FILE: &str = "window-state.json";
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_DIRECTORY: &str = "logs";
const DEFAULT_LOG_RETENTION_DAYS: usize = 7;

const LOOPBACK_HOSTS: [&str; 3] = ["127.0.0.1", "localhost", "::1"];
