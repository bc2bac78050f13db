//! Time-windowed, in-memory cache of successful rank checks.
//!
//! One [`ResultCache`] is created at startup and shared by every request.
//! Entries expire once they are older than the freshness window. There is
//! no background sweeper: every `get`/`put` first purges expired entries
//! and then reads or writes, all under a single lock.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, Utc};

use crate::types::SearchResult;

/// Composite cache key: engine, normalised domain, phrase, requested count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    engine_id: u32,
    /// Output of `normalize_domain`.
    domain: String,
    /// Upper-cased phrase, so phrase case never splits entries.
    phrase: String,
    result_count: u32,
}

impl CacheKey {
    /// Build a key. `normalized_domain` must already be normalised; the
    /// phrase is upper-cased here.
    pub fn new(engine_id: u32, normalized_domain: &str, phrase: &str, result_count: u32) -> Self {
        Self {
            engine_id,
            domain: normalized_domain.to_owned(),
            phrase: phrase.to_uppercase(),
            result_count,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    result: SearchResult,
    inserted_at: DateTime<Utc>,
}

/// Process-wide store of recent successful results.
#[derive(Debug)]
pub struct ResultCache {
    freshness: TimeDelta,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl ResultCache {
    /// Create an empty cache whose entries stay fresh for `freshness`.
    pub fn new(freshness: TimeDelta) -> Self {
        Self {
            freshness,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Create a cache with a freshness window in whole seconds.
    pub fn with_ttl_seconds(ttl_seconds: u64) -> Self {
        let seconds = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        Self::new(TimeDelta::try_seconds(seconds).unwrap_or(TimeDelta::MAX))
    }

    pub fn freshness(&self) -> TimeDelta {
        self.freshness
    }

    /// Look up a fresh result for `key`.
    pub fn get(&self, key: &CacheKey) -> Option<SearchResult> {
        self.get_at(key, Utc::now())
    }

    /// [`get`](Self::get) evaluated at an explicit instant.
    pub fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<SearchResult> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        self.evict_expired(&mut entries, now);
        entries.get(key).map(|entry| entry.result.clone())
    }

    /// Store `result` under `key`, replacing any previous entry.
    pub fn put(&self, key: CacheKey, result: SearchResult) {
        self.put_at(key, result, Utc::now());
    }

    /// [`put`](Self::put) evaluated at an explicit instant.
    pub fn put_at(&self, key: CacheKey, result: SearchResult, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        self.evict_expired(&mut entries, now);
        entries.insert(
            key,
            CacheEntry {
                result,
                inserted_at: now,
            },
        );
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_expired(&self, entries: &mut HashMap<CacheKey, CacheEntry>, now: DateTime<Utc>) {
        let before = entries.len();
        entries.retain(|_, entry| now - entry.inserted_at <= self.freshness);
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = entries.len(), "expired cache entries evicted");
        }
    }
}

impl Default for ResultCache {
    /// One-hour freshness window.
    fn default() -> Self {
        Self::new(TimeDelta::hours(1))
    }
}
