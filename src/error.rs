//! Error types for cachedu

use thiserror::Error;

/// Result type alias for cachedu operations
pub type Result<T> = std::result::Result<T, CacheduError>;

/// Error types for cachedu operations
#[derive(Error, Debug)]
pub enum CacheduError {
    /// Path could not be inspected
    #[error("Cannot access '{path}': {reason}")]
    PathNotFound { path: String, reason: String },

    /// Cache record could not be written or removed
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}
