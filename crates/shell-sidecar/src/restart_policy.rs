use shell_config::RestartSettings;

use std::time::Duration;

/// Fixed-delay restart rule applied after the backend exits on its own.
///
/// There is no backoff growth. Without `max_attempts` every exit
/// schedules another restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartPolicy {
    pub enabled: bool,
    pub delay: Duration,
    pub max_attempts: Option<u32>,
}

impl RestartPolicy {
    pub fn from_settings(settings: &RestartSettings) -> Self {
        Self {
            enabled: settings.enabled,
            delay: settings.delay(),
            max_attempts: settings.max_attempts,
        }
    }

    /// Delay before the next restart, or `None` when no restart should happen.
    pub fn delay_for(&self, attempts_so_far: u32) -> Option<Duration> {
        if !self.enabled {
            return None;
        }

        match self.max_attempts {
            Some(max) if attempts_so_far >= max => None,
            _ => Some(self.delay),
        }
    }
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self::from_settings(&RestartSettings::default())
    }
}
