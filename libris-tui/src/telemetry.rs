//! File-backed structured logging.
//!
//! The terminal is owned by the UI, so log lines go to `log_path` as JSON.

use crate::config::TuiConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid log filter: {0}")]
    Filter(String),
    #[error("Failed to init subscriber: {0}")]
    Init(String),
}

/// Filter from `RUST_LOG`, falling back to the configured directive.
pub fn build_filter(config: &TuiConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| TelemetryError::Filter(e.to_string())),
    }
}

pub fn init_logging(config: &TuiConfig) -> Result<(), TelemetryError> {
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    let env_filter = build_filter(config)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::info!(
        api_base_url = %config.api_base_url,
        log_path = %config.log_path.display(),
        "Logging initialized"
    );
    Ok(())
}
