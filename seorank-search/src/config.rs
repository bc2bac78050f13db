//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls request timeouts, redirect handling, the
//! result-cache freshness window, and the outbound User-Agent.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for fetching and caching rank checks.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// HTTP request timeout in seconds for a results page.
    pub timeout_seconds: u64,
    /// How long a successful result may be served from cache, in seconds.
    pub cache_ttl_seconds: u64,
    /// Redirects followed before the redirect response itself is handed
    /// back as the page. `0` hands back the first redirect.
    pub max_redirects: usize,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            cache_ttl_seconds: 3600,
            max_redirects: 10,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `cache_ttl_seconds` must be greater than 0
    /// - a custom `user_agent` must not be blank
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.cache_ttl_seconds == 0 {
            return Err(SearchError::Config(
                "cache_ttl_seconds must be greater than 0".into(),
            ));
        }
        if matches!(self.user_agent.as_deref(), Some(ua) if ua.trim().is_empty()) {
            return Err(SearchError::Config("user_agent must not be blank".into()));
        }
        Ok(())
    }
}
