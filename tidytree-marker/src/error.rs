//! Error types for the marker model
//!
//! Structured error handling using thiserror.

use thiserror::Error;

/// Result type alias for marker operations
pub type Result<T> = std::result::Result<T, MarkerError>;

/// Errors raised by the marker model
#[derive(Error, Debug)]
pub enum MarkerError {
    /// JSON parsing error while loading or emitting a tree
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A marker's end position precedes its start position
    #[error("Invalid span on {id}: end {end} precedes start {start}")]
    InvalidSpan { id: String, start: usize, end: usize },
}
