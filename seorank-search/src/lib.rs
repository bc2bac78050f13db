//! # seorank-search
//!
//! Where does a domain rank for a phrase on a given search engine?
//!
//! This crate fetches a live search-results page, scans the raw HTML for an
//! engine-specific marker string, and reports the 1-based positions at
//! which the target domain appears.
//!
//! ## Design
//!
//! - Engines are data: a URL template plus a marker, held in an
//!   [`EngineRegistry`] injected at construction
//! - Extraction is plain substring scanning over the initial HTML; no
//!   script execution or DOM
//! - Successful checks are cached in memory for a freshness window
//!   (one hour by default) with lazy eviction
//! - Every failure comes back as a [`SearchResult`] with `success == false`,
//!   never as a panic or an error escaping the orchestrator
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - Search phrases and URLs are logged only at trace level

pub mod cache;
pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod query;
pub mod types;

use std::sync::Arc;

pub use cache::{CacheKey, ResultCache};
pub use config::SearchConfig;
pub use engine::{EngineRegistry, SearchEngineMapping};
pub use error::{Result, SearchError};
pub use http::{FetchedPage, HttpFetcher, PageFetcher};
pub use orchestrator::search::RankChecker;
pub use query::RawRankRequest;
pub use types::{RankReport, SearchQuery, SearchResult};

/// Build a [`RankChecker`] that fetches over HTTP.
///
/// Validates `config`, creates a fresh [`ResultCache`] with the configured
/// freshness window, and wires both to `registry`.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the configuration is invalid or the
/// HTTP client cannot be built.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> seorank_search::Result<()> {
/// use seorank_search::{EngineRegistry, SearchConfig, SearchQuery};
///
/// let checker = seorank_search::rank_checker(&SearchConfig::default(), EngineRegistry::builtin())?;
/// let result = checker
///     .check(&SearchQuery {
///         engine_id: 1,
///         phrase: "e-Settlements".into(),
///         target_domain: "www.sympli.com.au".into(),
///         result_count: 100,
///     })
///     .await;
/// println!("{}: {}", result.engine_name, result.rankings());
/// # Ok(())
/// # }
/// ```
pub fn rank_checker(
    config: &SearchConfig,
    registry: EngineRegistry,
) -> Result<RankChecker<HttpFetcher>> {
    config.validate()?;
    let fetcher = HttpFetcher::new(config)?;
    let cache = ResultCache::with_ttl_seconds(config.cache_ttl_seconds);
    Ok(RankChecker::new(Arc::new(registry), Arc::new(cache), fetcher))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_checker_validates_config() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = rank_checker(&config, EngineRegistry::builtin())
            .err()
            .expect("invalid config rejected");
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn rank_checker_uses_configured_window() {
        let config = SearchConfig {
            cache_ttl_seconds: 120,
            ..Default::default()
        };
        let checker = rank_checker(&config, EngineRegistry::builtin()).expect("valid");
        assert_eq!(checker.cache().freshness(), chrono::TimeDelta::seconds(120));
        assert_eq!(checker.registry().len(), 3);
    }
}
