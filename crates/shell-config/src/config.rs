//! Shell configuration with validation, versioning and environment overrides.

use crate::{
    APP_DIR_NAME, BackendSettings, CONFIG_FILENAME, CONFIG_VERSION, ConfigError,
    ConfigErrorResult, ENV_PYTHON, ENV_SERVER_PORT, LoggingSettings,
    RestartSettings, WindowSettings,
};

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Config file format version
    pub version: u32,
    pub backend: BackendSettings,
    pub restart: RestartSettings,
    pub window: WindowSettings,
    pub logging: LoggingSettings,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            backend: BackendSettings::default(),
            restart: RestartSettings::default(),
            window: WindowSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl ShellConfig {
    /// Load config from `<dir>/config.toml`, creating it with defaults if missing.
    ///
    /// Loading order:
    /// 1. Parse config.toml if it exists, else write defaults
    /// 2. Migrate older versions and persist the result
    ///
    /// File values only. Environment overrides and validation are applied by
    /// [`ShellConfig::load`] or [`ShellConfig::resolve`].
    pub fn load_or_create(dir: &Path) -> ConfigErrorResult<Self> {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir.to_path_buf(), e))?;
        }

        let config_path = dir.join(CONFIG_FILENAME);

        if config_path.exists() {
            let mut config = Self::load_toml(&config_path)?;
            if config.version < CONFIG_VERSION {
                config = Self::migrate(config);
                config.save(dir)?;
            }
            Ok(config)
        } else {
            let config = Self::default();
            config.save(dir)?;
            debug!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    /// [`ShellConfig::load_or_create`] followed by environment overrides.
    ///
    /// Does NOT validate - call validate() after loading.
    pub fn load(dir: &Path) -> ConfigErrorResult<Self> {
        let mut config = Self::load_or_create(dir)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Turn a load result into the config the application runs with.
    ///
    /// Environment overrides are applied, then the result is validated. A
    /// file that failed to load, or settings that fail validation, are
    /// logged and replaced by defaults so startup never aborts on config.
    pub fn resolve(loaded: ConfigErrorResult<Self>) -> Self {
        let mut config = loaded.unwrap_or_else(|e| {
            error!("Unable to load config, using defaults: {e}. {}", e.recovery_hint());
            Self::default()
        });
        config.apply_env_overrides();

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                error!("Invalid config, using defaults: {e}. {}", e.recovery_hint());
                Self::default()
            }
        }
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path.to_path_buf(), e))?;

        toml::from_str(&contents).map_err(|e| ConfigError::toml_parse(path.to_path_buf(), e))
    }

    /// Save config to `<dir>/config.toml` atomically.
    ///
    /// Uses write-to-temp-then-rename so an interrupted write never
    /// leaves a truncated file behind.
    pub fn save(&self, dir: &Path) -> ConfigErrorResult<()> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = toml::to_string_pretty(self)?;

        let temp_path = config_path.with_extension("toml.tmp");
        std::fs::write(&temp_path, &content).map_err(|e| ConfigError::io(temp_path.clone(), e))?;
        std::fs::rename(&temp_path, &config_path)
            .map_err(|e| ConfigError::io(config_path.clone(), e))?;

        Ok(())
    }

    fn migrate(mut config: Self) -> Self {
        // Version 0 -> 1: restart settings introduced
        if config.version == 0 {
            config.restart = RestartSettings::default();
            config.version = 1;
        }

        config
    }

    /// Per-user configuration directory for this application.
    pub fn default_config_dir() -> ConfigErrorResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(ConfigError::no_config_dir)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.backend.validate()?;
        self.restart.validate()?;
        self.window.validate()?;
        Ok(())
    }

    pub fn backend_addr(&self) -> String {
        format!("{}:{}", self.backend.host, self.backend.port)
    }

    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  backend: {} script={} executable={:?}",
            self.backend_addr(),
            self.backend.script,
            self.backend.executable
        );
        info!(
            "  restart: enabled={} delay={}ms max_attempts={:?}",
            self.restart.enabled, self.restart.delay_ms, self.restart.max_attempts
        );
        info!(
            "  window: state_file={} debounce={}ms",
            self.window.state_file, self.window.debounce_ms
        );
        info!(
            "  logging: {} (dir {}, keep {} days)",
            self.logging.level, self.logging.directory, self.logging.retention_days
        );
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(python) = std::env::var(ENV_PYTHON)
            && !python.trim().is_empty()
        {
            self.backend.executable = Some(PathBuf::from(python));
        }

        Self::apply_env_parse(ENV_SERVER_PORT, &mut self.backend.port);

        self.logging.level = self.logging.effective_level();
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name) {
            match val.trim().parse() {
                Ok(parsed) => *target = parsed,
                Err(_) => warn!("Ignoring {var_name}={val:?}: not a valid value"),
            }
        }
    }
}
