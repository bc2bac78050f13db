//! Rank-check orchestration: validate, look up, cache, fetch, scan, match.
//!
//! # Pipeline
//!
//! 1. Validate the query fields
//! 2. Resolve the engine mapping (unknown engine ends here, before the cache)
//! 3. Normalise the target domain for the cache key
//! 4. Return a fresh cached result if one exists
//! 5. Build the results-page URL and fetch it
//! 6. Scan the body for the engine's marker
//! 7. Match the target against the extracted entries
//! 8. Cache the record if it succeeded, then return it
//!
//! Every exit produces a [`SearchResult`]; failures are recorded in it
//! rather than returned as errors.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::{CacheKey, ResultCache};
use crate::engine::{EngineRegistry, SearchEngineMapping};
use crate::error::SearchError;
use crate::http::PageFetcher;
use crate::query::RawRankRequest;
use crate::types::{unmapped_engine_label, SearchQuery, SearchResult, UNSPECIFIED_ENGINE_NAME};

use super::extract::{extract_results, Extraction};
use super::rank::{match_ranks, normalize_domain};

/// Answers "where does this domain rank for this phrase on this engine?".
///
/// Holds shared handles to the engine table and the process-wide cache,
/// plus the fetcher used for cache misses.
pub struct RankChecker<F> {
    registry: Arc<EngineRegistry>,
    cache: Arc<ResultCache>,
    fetcher: F,
}

impl<F: PageFetcher> RankChecker<F> {
    pub fn new(registry: Arc<EngineRegistry>, cache: Arc<ResultCache>, fetcher: F) -> Self {
        Self {
            registry,
            cache,
            fetcher,
        }
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Validate `raw` and run the check.
    ///
    /// Missing or malformed fields produce a failure record naming the
    /// field; no fetch is attempted.
    pub async fn check_request(&self, raw: &RawRankRequest) -> SearchResult {
        if raw.is_empty() {
            tracing::debug!("rank request carried no fields");
            return SearchResult::failure_with_message(
                UNSPECIFIED_ENGINE_NAME,
                "Header Data missing from request",
            );
        }
        match raw.validate() {
            Ok(query) => self.check(&query).await,
            Err(err) => {
                tracing::debug!(error = %err, "rank request rejected");
                SearchResult::failure(UNSPECIFIED_ENGINE_NAME, &err)
            }
        }
    }

    /// Run a check for a query.
    ///
    /// A blank phrase, a target with no domain or a zero result count
    /// yields a failure record; nothing is fetched or cached.
    pub async fn check(&self, query: &SearchQuery) -> SearchResult {
        if let Err(err) = query.validate() {
            tracing::debug!(error = %err, "rank query rejected");
            return SearchResult::failure(UNSPECIFIED_ENGINE_NAME, &err);
        }
        let normalized = normalize_domain(&query.target_domain);

        let mapping = match self.registry.lookup(query.engine_id) {
            Ok(mapping) => mapping,
            Err(err) => {
                tracing::debug!(engine_id = query.engine_id, "no engine mapping");
                let mut result =
                    SearchResult::failure(unmapped_engine_label(query.engine_id), &err);
                result.engine_id = Some(query.engine_id);
                result.phrase.clone_from(&query.phrase);
                result.normalized_target = normalized;
                return result;
            }
        };

        let key = CacheKey::new(mapping.id, &normalized, &query.phrase, query.result_count);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(engine = %mapping.name, "rank served from cache");
            return cached;
        }
        tracing::debug!(engine = %mapping.name, "rank cache miss");

        let searched_at = Utc::now();
        match self.search_uncached(mapping, query, &normalized, searched_at).await {
            Ok(result) => {
                if result.success {
                    self.cache.put(key, result.clone());
                }
                result
            }
            Err(err) => {
                tracing::warn!(engine = %mapping.name, error = %err, "rank check failed");
                let mut result = base_record(mapping, query, &normalized, searched_at);
                result.error_message = Some(err.to_string());
                result
            }
        }
    }

    async fn search_uncached(
        &self,
        mapping: &SearchEngineMapping,
        query: &SearchQuery,
        normalized: &str,
        searched_at: DateTime<Utc>,
    ) -> Result<SearchResult, SearchError> {
        let url = mapping.build_url(&query.phrase, query.result_count);
        tracing::trace!(engine = %mapping.name, %url, "fetching results page");

        let page = self.fetcher.fetch(&url).await?;
        tracing::debug!(engine = %mapping.name, status = page.status(), "results page fetched");
        let extraction = extract_results(page.body(), &mapping.result_marker)?;

        Ok(assemble(mapping, query, normalized, searched_at, &extraction))
    }
}

/// Record carrying the query context, not yet successful.
fn base_record(
    mapping: &SearchEngineMapping,
    query: &SearchQuery,
    normalized: &str,
    searched_at: DateTime<Utc>,
) -> SearchResult {
    SearchResult {
        engine_id: Some(mapping.id),
        engine_name: mapping.name.clone(),
        searched_at: Some(searched_at),
        phrase: query.phrase.clone(),
        normalized_target: normalized.to_owned(),
        result_count: 0,
        match_count: 0,
        ranks: vec![0],
        highest_rank: None,
        success: false,
        error_message: None,
    }
}

fn assemble(
    mapping: &SearchEngineMapping,
    query: &SearchQuery,
    normalized: &str,
    searched_at: DateTime<Utc>,
    extraction: &Extraction,
) -> SearchResult {
    let mut result = base_record(mapping, query, normalized, searched_at);
    match extraction {
        Extraction::MarkerAbsent => {
            result.error_message = Some(format!(
                "found no instances of search tag: {}",
                mapping.result_marker
            ));
        }
        Extraction::Found {
            occurrences,
            results,
        } if results.is_empty() => {
            result.error_message = Some(format!(
                "found {occurrences} instances of search tag {} but no result text",
                mapping.result_marker
            ));
        }
        Extraction::Found { results, .. } => {
            let matched = match_ranks(results, normalized);
            result.result_count = results.len();
            result.match_count = matched.match_count;
            result.ranks = matched.ranks;
            result.highest_rank = matched.highest_rank;
            result.success = true;
        }
    }
    result
}
