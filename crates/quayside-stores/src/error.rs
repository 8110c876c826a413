//! Store error types

use thiserror::Error;

/// Upload and lookup errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Non-success status from the remote service
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Invalid artifact
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Timeout
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the packaging side (reading artifacts)
    #[error(transparent)]
    Adapter(#[from] quayside_core::QuaysideError),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
