use crate::{DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_LEVEL, DEFAULT_LOG_RETENTION_DAYS, ENV_LOG_LEVEL};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Log directory (relative to the app log root)
    pub directory: String,

    /// Number of daily log files to keep
    pub retention_days: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: String::from(DEFAULT_LOG_LEVEL),
            directory: String::from(DEFAULT_LOG_DIRECTORY),
            retention_days: DEFAULT_LOG_RETENTION_DAYS,
        }
    }
}

impl LoggingSettings {
    /// The configured level, or `SHELL_LOG_LEVEL` when it is set and non-empty.
    pub fn effective_level(&self) -> String {
        match std::env::var(ENV_LOG_LEVEL) {
            Ok(level) if !level.trim().is_empty() => level,
            _ => self.level.clone(),
        }
    }
}
