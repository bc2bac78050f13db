//! Validation of raw rank-check requests.
//!
//! Requests arrive as four loosely-typed text fields (HTTP headers in the
//! server). [`RawRankRequest::validate`] turns them into a [`SearchQuery`]
//! or a [`SearchError::MissingOrMalformedInput`] naming the field at fault.

use crate::error::SearchError;
use crate::orchestrator::rank::normalize_domain;
use crate::types::SearchQuery;

/// Field names as clients send them.
pub const SEARCH_STRING_FIELD: &str = "searchString";
pub const TARGET_URL_FIELD: &str = "targetUrl";
pub const RESULTS_COUNT_FIELD: &str = "resultsCount";
pub const ENGINE_TYPE_FIELD: &str = "engineTypeId";

/// The four request inputs, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRankRequest {
    pub search_string: Option<String>,
    pub target_url: Option<String>,
    pub results_count: Option<String>,
    pub engine_type_id: Option<String>,
}

impl RawRankRequest {
    /// Whether no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.search_string.is_none()
            && self.target_url.is_none()
            && self.results_count.is_none()
            && self.engine_type_id.is_none()
    }

    /// Check every field and build a [`SearchQuery`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingOrMalformedInput`] for the first field
    /// that is absent, blank, or not a valid number. `resultsCount` must be
    /// a positive integer; `engineTypeId` any non-negative integer (unknown
    /// ids are rejected later by the registry).
    pub fn validate(&self) -> Result<SearchQuery, SearchError> {
        let phrase = required_text(SEARCH_STRING_FIELD, self.search_string.as_deref())?;
        let target = required_text(TARGET_URL_FIELD, self.target_url.as_deref())?;
        if normalize_domain(target).is_empty() {
            return Err(malformed(TARGET_URL_FIELD, "contains no domain"));
        }

        let count_text = required_text(RESULTS_COUNT_FIELD, self.results_count.as_deref())?;
        let result_count: u32 = count_text
            .parse()
            .map_err(|_| malformed(RESULTS_COUNT_FIELD, "is not a positive integer"))?;
        if result_count == 0 {
            return Err(malformed(RESULTS_COUNT_FIELD, "must be greater than 0"));
        }

        let engine_text = required_text(ENGINE_TYPE_FIELD, self.engine_type_id.as_deref())?;
        let engine_id: u32 = engine_text
            .parse()
            .map_err(|_| malformed(ENGINE_TYPE_FIELD, "is not a valid engine code"))?;

        Ok(SearchQuery {
            engine_id,
            phrase: phrase.to_owned(),
            target_domain: target.to_owned(),
            result_count,
        })
    }
}

impl SearchQuery {
    /// Check a query built by hand rather than through [`RawRankRequest::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingOrMalformedInput`] for a blank phrase,
    /// a target with no domain left after normalisation, or a zero
    /// result count.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.phrase.trim().is_empty() {
            return Err(malformed(SEARCH_STRING_FIELD, "is empty"));
        }
        if normalize_domain(&self.target_domain).is_empty() {
            return Err(malformed(TARGET_URL_FIELD, "contains no domain"));
        }
        if self.result_count == 0 {
            return Err(malformed(RESULTS_COUNT_FIELD, "must be greater than 0"));
        }
        Ok(())
    }
}

fn required_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, SearchError> {
    match value.map(str::trim) {
        None => Err(SearchError::MissingOrMalformedInput(format!("{field} is missing"))),
        Some("") => Err(malformed(field, "is empty")),
        Some(text) => Ok(text),
    }
}

fn malformed(field: &str, problem: &str) -> SearchError {
    SearchError::MissingOrMalformedInput(format!("{field} {problem}"))
}
