use crate::{ExecutableResolver, RestartPolicy};

use shell_config::ShellConfig;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything the supervisor needs, resolved once at construction.
#[derive(Debug, Clone)]
pub struct SupervisorOptions {
    pub host: String,
    pub port: u16,
    pub probe_timeout: Duration,
    pub shutdown_path: String,
    pub shutdown_timeout: Duration,
    pub resolver: ExecutableResolver,
    pub restart: RestartPolicy,
    /// Append-only record of backend stderr; `None` disables it
    pub error_log: Option<PathBuf>,
}

impl SupervisorOptions {
    /// `app_dir` holds the backend script and venv; `log_dir` receives the stderr record.
    pub fn from_config(config: &ShellConfig, app_dir: &Path, log_dir: &Path) -> Self {
        let backend = &config.backend;

        Self {
            host: backend.host.clone(),
            port: backend.port,
            probe_timeout: backend.probe_timeout(),
            shutdown_path: backend.shutdown_path.clone(),
            shutdown_timeout: backend.shutdown_timeout(),
            resolver: ExecutableResolver::from_settings(backend, app_dir),
            restart: RestartPolicy::from_settings(&config.restart),
            error_log: Some(log_dir.join(&backend.error_log_file)),
        }
    }
}
