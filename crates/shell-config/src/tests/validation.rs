use crate::{ConfigError, ShellConfig};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok, pat};

#[test]
fn given_defaults_when_validate_then_ok() {
    assert_that!(ShellConfig::default().validate(), ok(anything()));
}

#[test]
fn given_localhost_and_ipv6_loopback_when_validate_then_ok() {
    for host in ["localhost", "::1"] {
        let mut config = ShellConfig::default();
        config.backend.host = host.into();
        assert_that!(config.validate(), ok(anything()));
    }
}

#[test]
fn given_non_loopback_host_when_validate_then_invalid() {
    let mut config = ShellConfig::default();
    config.backend.host = "0.0.0.0".into();

    assert_that!(
        config.validate(),
        err(pat!(ConfigError::Invalid {
            message: contains_substring("backend.host"),
            ..
        }))
    );
}

#[test]
fn given_zero_port_when_validate_then_invalid() {
    let mut config = ShellConfig::default();
    config.backend.port = 0;

    assert_that!(
        config.validate(),
        err(pat!(ConfigError::Invalid {
            message: contains_substring("backend.port"),
            ..
        }))
    );
}

#[test]
fn given_zero_probe_timeout_when_validate_then_invalid() {
    let mut config = ShellConfig::default();
    config.backend.probe_timeout_ms = 0;

    assert_that!(
        config.validate(),
        err(pat!(ConfigError::Invalid {
            message: contains_substring("probe_timeout_ms"),
            ..
        }))
    );
}

#[test]
fn given_relative_shutdown_path_when_validate_then_invalid() {
    let mut config = ShellConfig::default();
    config.backend.shutdown_path = "shutdown".into();

    let result = config.validate();

    assert!(result.unwrap_err().to_string().contains("shutdown_path"));
}

#[test]
fn given_zero_max_attempts_when_validate_then_invalid() {
    let mut config = ShellConfig::default();
    config.restart.max_attempts = Some(0);

    assert_that!(
        config.validate(),
        err(pat!(ConfigError::Invalid {
            message: contains_substring("max_attempts"),
            ..
        }))
    );
}

#[test]
fn given_zero_debounce_when_validate_then_invalid() {
    let mut config = ShellConfig::default();
    config.window.debounce_ms = 0;

    assert_that!(
        config.validate(),
        err(pat!(ConfigError::Invalid {
            message: contains_substring("debounce_ms"),
            ..
        }))
    );
}

#[test]
fn given_zero_default_width_when_validate_then_invalid() {
    let mut config = ShellConfig::default();
    config.window.default_width = 0;

    assert_that!(
        config.validate(),
        err(pat!(ConfigError::Invalid {
            message: contains_substring("default geometry"),
            ..
        }))
    );
}

#[test]
fn given_restart_disabled_when_validate_then_ok() {
    let mut config = ShellConfig::default();
    config.restart.enabled = false;

    assert_that!(config.validate(), ok(anything()));
}
