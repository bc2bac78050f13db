//! Error types for the seorank service.

use seorank_search::SearchError;

/// Top-level error type for starting and running the service.
///
/// Per-request failures never surface here; they are reported inside the
/// rank report itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be read, parsed, or validated.
    #[error("config error: {0}")]
    Config(String),

    /// The rank-checking core rejected its setup.
    #[error("search setup error: {0}")]
    Search(#[from] SearchError),

    /// HTTP server bind or serve error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
