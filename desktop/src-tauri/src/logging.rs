//! Logging setup with file rotation.

use shell_config::LoggingSettings;

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "sidecar-shell";
const FALLBACK_FILTER: &str = "info";

/// Setup logging with console and rotating file output.
///
/// # Log Layers
/// - Console: Human-readable, colored output
/// - File: plain text, daily rotation, `retention_days` files kept
///
/// `RUST_LOG` takes precedence over `SHELL_LOG_LEVEL`, which takes precedence
/// over the configured level.
pub fn setup_logging(
    log_dir: &Path,
    settings: &LoggingSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(true);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(settings.retention_days)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(build_filter(&settings.effective_level()))
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

pub(crate) fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}
