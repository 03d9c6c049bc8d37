use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DEBOUNCE_MS, DEFAULT_STATE_FILE,
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Geometry file name inside the per-user config directory
    pub state_file: String,

    /// Quiet period before a queued geometry write hits disk
    pub debounce_ms: u64,

    pub default_width: u32,
    pub default_height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            state_file: String::from(DEFAULT_STATE_FILE),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_width: DEFAULT_WINDOW_WIDTH,
            default_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl WindowSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::invalid("window.debounce_ms must be > 0"));
        }

        if self.default_width == 0 || self.default_height == 0 {
            return Err(ConfigError::invalid(format!(
                "window default geometry must be positive, got {}x{}",
                self.default_width, self.default_height
            )));
        }

        if self.state_file.trim().is_empty() {
            return Err(ConfigError::invalid("window.state_file must not be empty"));
        }

        Ok(())
    }
}
