//! Error types for the position feed

use thiserror::Error;

/// Result type for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors that can occur while fetching or decoding a position report
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("feed returned status {0}")]
    Status(reqwest::StatusCode),

    /// Body was not the expected JSON shape
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A coordinate string that is not a number
    #[error("invalid {field}: {value:?}")]
    Coordinate { field: &'static str, value: String },
}
