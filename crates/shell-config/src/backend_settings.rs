use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ERROR_LOG_FILE, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_SCRIPT, DEFAULT_SHUTDOWN_PATH, DEFAULT_SHUTDOWN_TIMEOUT_MS,
    DEFAULT_VENV_DIR, LOOPBACK_HOSTS,
};

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Host the backend listens on (loopback only)
    pub host: String,

    /// Backend port, also handed to the child as PY_SERVER_PORT
    pub port: u16,

    /// Script passed as the single argument to the interpreter
    pub script: String,

    /// Explicit interpreter path; skips venv and system lookup when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,

    /// Bundled virtual environment directory, relative to the app directory
    pub venv_dir: String,

    /// Connection attempt timeout for the reachability probe
    pub probe_timeout_ms: u64,

    /// Control endpoint for graceful shutdown
    pub shutdown_path: String,

    /// Upper bound on the shutdown request
    pub shutdown_timeout_ms: u64,

    /// File (in the log directory) that collects backend stderr
    pub error_log_file: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            script: String::from(DEFAULT_SCRIPT),
            executable: None,
            venv_dir: String::from(DEFAULT_VENV_DIR),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            shutdown_path: String::from(DEFAULT_SHUTDOWN_PATH),
            shutdown_timeout_ms: DEFAULT_SHUTDOWN_TIMEOUT_MS,
            error_log_file: String::from(DEFAULT_ERROR_LOG_FILE),
        }
    }
}

impl BackendSettings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.port == 0 {
            return Err(ConfigError::invalid("backend.port must be non-zero"));
        }

        if !LOOPBACK_HOSTS.contains(&self.host.as_str()) {
            return Err(ConfigError::invalid(format!(
                "backend.host must be one of {LOOPBACK_HOSTS:?}, got {}",
                self.host
            )));
        }

        if self.script.trim().is_empty() {
            return Err(ConfigError::invalid("backend.script must not be empty"));
        }

        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::invalid("backend.probe_timeout_ms must be > 0"));
        }

        if self.shutdown_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "backend.shutdown_timeout_ms must be > 0",
            ));
        }

        if !self.shutdown_path.starts_with('/') {
            return Err(ConfigError::invalid(format!(
                "backend.shutdown_path must start with '/', got {}",
                self.shutdown_path
            )));
        }

        Ok(())
    }
}
