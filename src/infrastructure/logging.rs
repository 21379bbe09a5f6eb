//! Logging system configuration and initialization
//!
//! Builds a `tracing` subscriber from the logging section of the app
//! configuration: an `EnvFilter` assembled from the configured level and
//! per-module overrides, console output, and an optional non-blocking log
//! file whose writer guard stays alive for the process lifetime.

use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

pub use crate::infrastructure::config::LoggingConfig;

// Keeps the non-blocking file writer flushing until process exit
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

const LOG_FILE_NAME: &str = "featured-sync.log";

/// Get the log directory relative to the executable location
pub fn get_log_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    for (module, level) in &config.module_filters {
        let directive = format!("{module}={level}")
            .parse()
            .with_context(|| format!("Invalid module filter: {module}={level}"))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize the logging system from the app configuration.
///
/// Fails if a global subscriber is already installed; tests that want logs
/// should install their own subscriber instead.
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let console_layer = config
        .console_output
        .then(|| fmt::layer().with_target(true));

    let file_layer = if config.file_output {
        let log_dir = config.log_dir.clone().unwrap_or_else(get_log_directory);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
        let (writer, guard) = non_blocking(rolling::never(&log_dir, LOG_FILE_NAME));
        LOG_GUARD.set(guard).ok();
        Some(fmt::layer().with_ansi(false).with_writer(writer))
    } else {
        None
    };

    Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Logging already initialized")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_module_overrides() {
        let config = LoggingConfig::default();
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_invalid_module_filter_is_an_error() {
        let mut config = LoggingConfig::default();
        config
            .module_filters
            .insert("sqlx".to_string(), "not a level".to_string());
        assert!(build_filter(&config).is_err());
    }
}
