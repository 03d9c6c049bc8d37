mod validation;

use std::env;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Clear every variable the config reads so tests start from file values only.
pub(crate) fn clear_overrides() -> [EnvGuard; 3] {
    [
        EnvGuard::remove(crate::ENV_PYTHON),
        EnvGuard::remove(crate::ENV_SERVER_PORT),
        EnvGuard::remove(crate::ENV_LOG_LEVEL),
    ]
}
