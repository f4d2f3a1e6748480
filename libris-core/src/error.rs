//! Error types for query handling

use thiserror::Error;

/// Errors raised when turning a query string back into search criteria.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryParseError {
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for {param}: {value}")]
    InvalidValue { param: &'static str, value: String },

    #[error("Unsupported parameter for {endpoint}: {param}")]
    UnexpectedParameter { endpoint: &'static str, param: String },
}
