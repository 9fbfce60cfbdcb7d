//! Error types for bugzilla-dashboard

use thiserror::Error;

/// Result type alias for bugzilla-dashboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bugzilla-dashboard
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Page {page} is out of range (table has {pages} pages)")]
    PageOutOfRange { page: usize, pages: usize },

    #[error("Column {index} is out of range (table has {columns} columns)")]
    ColumnOutOfRange { index: usize, columns: usize },
}
