//! Error types for bugzilla-dashboard-core (WASM-compatible)

use thiserror::Error;

/// Result type alias for bugzilla-dashboard-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that work in both native and WASM environments
///
/// The builders and the comparator are total; errors only come from
/// loading records or configuration and from parsing user input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid sort direction: '{0}' (expected 'asc' or 'desc')")]
    InvalidDirection(String),

    #[error("Invalid chart type: '{0}'")]
    InvalidChartType(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
