use crate::{ConfigError, ConfigErrorResult, DEFAULT_RESTART_DELAY_MS, DEFAULT_RESTART_ENABLED};

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestartSettings {
    /// Restart the backend after it exits on its own
    pub enabled: bool,

    /// Fixed delay before each restart attempt (milliseconds)
    pub delay_ms: u64,

    /// Optional ceiling on restart attempts; unset means no ceiling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

impl Default for RestartSettings {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_RESTART_ENABLED,
            delay_ms: DEFAULT_RESTART_DELAY_MS,
            max_attempts: None,
        }
    }
}

impl RestartSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts == Some(0) {
            return Err(ConfigError::invalid(
                "restart.max_attempts must be > 0 (use restart.enabled = false to disable)",
            ));
        }

        Ok(())
    }
}
