//! Core types: validated queries, rank results, and the wire report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Engine id reserved for "no engine selected".
pub const UNASSIGNED_ENGINE_ID: u32 = 0;

/// Engine name reported when the request never identified an engine.
pub const UNSPECIFIED_ENGINE_NAME: &str = "UNSPECIFIED";

/// Label used for an engine id that has no mapping.
///
/// The reserved id `0` reads as `"Unassigned"`; anything else is reported
/// as its raw numeric code.
pub fn unmapped_engine_label(engine_id: u32) -> String {
    if engine_id == UNASSIGNED_ENGINE_ID {
        "Unassigned".to_owned()
    } else {
        engine_id.to_string()
    }
}

/// A validated rank-check request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Which engine mapping to query.
    pub engine_id: u32,
    /// Text to search for, e.g. `e-Settlements`.
    pub phrase: String,
    /// Domain whose rank is reported, as supplied (not yet normalised).
    pub target_domain: String,
    /// How many results to ask the engine for.
    pub result_count: u32,
}

/// Outcome of a single rank check.
///
/// Failure records use the same shape with `success == false` and an
/// `error_message`; `ranks` is never empty and holds `[0]` when nothing
/// matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Engine id, absent when the request never named a valid one.
    pub engine_id: Option<u32>,
    /// Resolved engine name or raw label.
    pub engine_name: String,
    /// When the results page was requested.
    pub searched_at: Option<DateTime<Utc>>,
    /// The phrase that was searched.
    pub phrase: String,
    /// Target domain after normalisation.
    pub normalized_target: String,
    /// Number of result entries extracted from the page.
    pub result_count: usize,
    /// Number of entries matching the target domain.
    pub match_count: usize,
    /// 1-based matching positions, or `[0]` when none matched.
    pub ranks: Vec<usize>,
    /// First matching position.
    pub highest_rank: Option<usize>,
    /// Whether the page was fetched and scanned successfully.
    pub success: bool,
    /// Human-readable reason for a failure.
    pub error_message: Option<String>,
}

impl SearchResult {
    /// Build a failure record for `engine_name` describing `err`.
    pub fn failure(engine_name: impl Into<String>, err: &SearchError) -> Self {
        Self::failure_with_message(engine_name, err.to_string())
    }

    /// Build a failure record with a free-form message.
    pub fn failure_with_message(engine_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            engine_id: None,
            engine_name: engine_name.into(),
            searched_at: None,
            phrase: String::new(),
            normalized_target: String::new(),
            result_count: 0,
            match_count: 0,
            ranks: vec![0],
            highest_rank: None,
            success: false,
            error_message: Some(message.into()),
        }
    }

    /// Rank list joined for display, e.g. `"1, 3"` or `"0"`.
    pub fn rankings(&self) -> String {
        self.ranks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Convert into the JSON report returned to HTTP clients.
    pub fn to_report(&self) -> RankReport {
        RankReport {
            engine_name: self.engine_name.clone(),
            search_date: self.searched_at,
            search_keywords: non_empty(&self.phrase),
            search_url: non_empty(&self.normalized_target),
            result_count: self.result_count,
            match_count: self.match_count,
            highest_ranking: self.highest_rank,
            rankings: self.rankings(),
            success: self.success,
            error_message: self.error_message.clone(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

/// Wire representation of a [`SearchResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankReport {
    pub engine_name: String,
    pub search_date: Option<DateTime<Utc>>,
    pub search_keywords: Option<String>,
    /// Normalised target domain.
    #[serde(rename = "searchURL")]
    pub search_url: Option<String>,
    pub result_count: usize,
    pub match_count: usize,
    pub highest_ranking: Option<usize>,
    pub rankings: String,
    pub success: bool,
    pub error_message: Option<String>,
}

impl From<&SearchResult> for RankReport {
    fn from(result: &SearchResult) -> Self {
        result.to_report()
    }
}
