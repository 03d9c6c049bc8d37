//! Interpreter resolution and the command line used to spawn the backend.

use crate::{SYSTEM_INTERPRETER, VENV_INTERPRETER};

use shell_config::{BackendSettings, ENV_SERVER_PORT};

use std::path::{Path, PathBuf};

use tracing::info;

/// Everything needed to spawn one backend process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: PathBuf,
    pub argument: PathBuf,
    pub working_dir: PathBuf,
    pub env: Vec<(String, String)>,
}

/// Picks the interpreter for each spawn.
///
/// Search order:
/// 1. Explicit override (config `backend.executable` or `PYTHON`)
/// 2. Bundled virtual environment under the app directory
/// 3. System interpreter on PATH
#[derive(Debug, Clone)]
pub struct ExecutableResolver {
    pub executable_override: Option<PathBuf>,
    pub app_dir: PathBuf,
    pub venv_dir: PathBuf,
    pub script: PathBuf,
    pub port: u16,
}

impl ExecutableResolver {
    pub fn from_settings(settings: &BackendSettings, app_dir: &Path) -> Self {
        Self {
            executable_override: settings.executable.clone(),
            app_dir: app_dir.to_path_buf(),
            venv_dir: PathBuf::from(&settings.venv_dir),
            script: PathBuf::from(&settings.script),
            port: settings.port,
        }
    }

    /// Bundled interpreter location, whether or not it exists.
    pub fn venv_interpreter(&self) -> PathBuf {
        VENV_INTERPRETER
            .iter()
            .fold(self.app_dir.join(&self.venv_dir), |path, part| path.join(part))
    }

    pub fn resolve_program(&self) -> PathBuf {
        if let Some(program) = &self.executable_override {
            info!("Using backend interpreter (override): {}", program.display());
            return program.clone();
        }

        let venv = self.venv_interpreter();
        if venv.exists() {
            info!("Using backend interpreter (venv): {}", venv.display());
            return venv;
        }

        info!("Using backend interpreter (system): {SYSTEM_INTERPRETER}");
        PathBuf::from(SYSTEM_INTERPRETER)
    }

    /// Resolve a fresh plan. Called on every spawn so that a venv
    /// created after startup is picked up.
    pub fn plan(&self) -> LaunchPlan {
        LaunchPlan {
            program: self.resolve_program(),
            argument: self.app_dir.join(&self.script),
            working_dir: self.app_dir.clone(),
            env: vec![(String::from(ENV_SERVER_PORT), self.port.to_string())],
        }
    }
}
