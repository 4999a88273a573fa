pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod state;

use std::path::Path;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::AppError;

pub const DEFAULT_LOG_DIR: &str = "./logs";
const LOG_RETENTION_DAYS: usize = 14;

/// Daily `event-listing.<date>.log` files under `dir`, oldest pruned after two weeks.
pub fn log_file_appender(dir: impl AsRef<Path>) -> Result<RollingFileAppender, AppError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("event-listing")
        .filename_suffix("log")
        .max_log_files(LOG_RETENTION_DAYS)
        .build(dir)
        .map_err(|e| AppError::Configuration(format!("Cannot open log directory: {}", e)))
}

/// Stdout gets human-readable output filtered by `RUST_LOG`; the file gets JSON
/// with source locations. `LOG_DIR` overrides the file location.
pub fn init_logging() -> Result<WorkerGuard, AppError> {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    let (file_writer, guard) = tracing_appender::non_blocking(log_file_appender(&log_dir)?);

    let stdout_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mongodb=warn"));
    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_filter(stdout_filter);

    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("info,event_listing=debug,mongodb=warn"));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!("Logging to stdout and {}", log_dir);
    Ok(guard)
}
