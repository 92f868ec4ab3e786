//! Error types for the tidytree engine
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, TidyError>;

/// Errors that can occur while filtering trees or emitting output
#[derive(Error, Debug)]
pub enum TidyError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error raised by the marker model
    #[error(transparent)]
    Marker(#[from] tidytree_marker::MarkerError),

    /// Tree file not found
    #[error("Tree file not found: {path}")]
    TreeNotFound { path: PathBuf },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A fixed chain was constructed with no stages
    #[error("A fixed chain requires at least one stage")]
    EmptyChain,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TidyError>,
    },
}

impl TidyError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TidyError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        TidyError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
