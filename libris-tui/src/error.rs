//! Error types for the TUI.

use crate::api_client::ApiClientError;
use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use crate::telemetry::TelemetryError;

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiClientError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}
