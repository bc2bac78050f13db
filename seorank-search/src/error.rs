//! Error types for the seorank-search crate.
//!
//! Every variant carries a stable, human-readable message. The orchestrator
//! turns these into failure records, so the `Display` output is what callers
//! ultimately see in `errorMessage`.

/// Errors that can occur while checking a search ranking.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A required request field was absent or could not be parsed.
    #[error("missing or incorrectly formatted input - {0}")]
    MissingOrMalformedInput(String),

    /// No engine mapping exists for the requested engine id.
    #[error("no mapping for search engine found: {0}")]
    UnknownEngine(String),

    /// The results page could not be fetched.
    #[error("search results could not be fetched: {0}")]
    FetchFailed(String),

    /// The results page did not arrive within the configured timeout.
    #[error("search request timed out: {0}")]
    FetchTimeout(String),

    /// The fetch succeeded but the payload has no `<body` to scan.
    #[error("search results could not be loaded - no HTML body found")]
    NoBodyFound,

    /// Invalid search configuration or engine table.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for seorank-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
