//! Engine registry: which URL to query and which marker to scan for.
//!
//! Each engine is a plain data mapping rather than bespoke scraping code.
//! Supporting another engine means adding a [`SearchEngineMapping`] to the
//! table handed to [`EngineRegistry::new`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::UNASSIGNED_ENGINE_ID;

/// Placeholder in a URL template replaced by the requested result count.
pub const RESULT_COUNT_PLACEHOLDER: &str = "{{numResults}}";

/// Placeholder in a URL template replaced by the form-encoded phrase.
pub const PHRASE_PLACEHOLDER: &str = "{{formattedSearch}}";

/// How to query one search engine and where its results sit in the HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngineMapping {
    /// Numeric engine code used by clients (`engineTypeId`).
    pub id: u32,
    /// Human-readable engine name.
    pub name: String,
    /// Query URL containing [`RESULT_COUNT_PLACEHOLDER`] and
    /// [`PHRASE_PLACEHOLDER`].
    pub url_template: String,
    /// Literal text that appears just before each result's display text.
    pub result_marker: String,
}

impl SearchEngineMapping {
    /// Build the results-page URL for `phrase`, asking for `result_count`
    /// entries.
    ///
    /// The phrase is `application/x-www-form-urlencoded`, so spaces become
    /// `+`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seorank_search::engine::SearchEngineMapping;
    ///
    /// let mapping = SearchEngineMapping {
    ///     id: 9,
    ///     name: "Test".into(),
    ///     url_template: "https://s.test/?q={{formattedSearch}}&n={{numResults}}".into(),
    ///     result_marker: "hit".into(),
    /// };
    /// assert_eq!(
    ///     mapping.build_url("digital settlements", 50),
    ///     "https://s.test/?q=digital+settlements&n=50"
    /// );
    /// ```
    pub fn build_url(&self, phrase: &str, result_count: u32) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(phrase.as_bytes()).collect();
        self.url_template
            .replace(RESULT_COUNT_PLACEHOLDER, &result_count.to_string())
            .replace(PHRASE_PLACEHOLDER, &encoded)
    }

    fn validate(&self) -> Result<(), SearchError> {
        if self.id == UNASSIGNED_ENGINE_ID {
            return Err(SearchError::Config(format!(
                "engine '{}' uses reserved id {UNASSIGNED_ENGINE_ID}",
                self.name
            )));
        }
        if self.result_marker.is_empty() {
            return Err(SearchError::Config(format!(
                "engine '{}' has an empty result marker",
                self.name
            )));
        }
        if !self.url_template.contains(PHRASE_PLACEHOLDER) {
            return Err(SearchError::Config(format!(
                "engine '{}' url_template lacks {PHRASE_PLACEHOLDER}",
                self.name
            )));
        }
        Ok(())
    }
}

/// Read-only table of engine mappings keyed by id.
#[derive(Debug, Clone)]
pub struct EngineRegistry {
    mappings: BTreeMap<u32, SearchEngineMapping>,
}

impl EngineRegistry {
    /// Build a registry from `mappings`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for a duplicate id, the reserved id
    /// `0`, an empty marker, or a template without a phrase placeholder.
    pub fn new(mappings: impl IntoIterator<Item = SearchEngineMapping>) -> Result<Self, SearchError> {
        let mut table: BTreeMap<u32, SearchEngineMapping> = BTreeMap::new();
        for mapping in mappings {
            mapping.validate()?;
            if let Some(existing) = table.get(&mapping.id) {
                return Err(SearchError::Config(format!(
                    "engine id {} assigned to both '{}' and '{}'",
                    mapping.id, existing.name, mapping.name
                )));
            }
            table.insert(mapping.id, mapping);
        }
        Ok(Self { mappings: table })
    }

    /// Registry holding the built-in Google, Bing and Yahoo mappings.
    pub fn builtin() -> Self {
        let mappings = crate::engines::builtin()
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        Self { mappings }
    }

    /// Look up the mapping for `engine_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownEngine`] carrying the raw engine label
    /// when no mapping exists.
    pub fn lookup(&self, engine_id: u32) -> Result<&SearchEngineMapping, SearchError> {
        self.mappings
            .get(&engine_id)
            .ok_or_else(|| SearchError::UnknownEngine(crate::types::unmapped_engine_label(engine_id)))
    }

    /// All mappings in ascending id order.
    pub fn engines(&self) -> impl Iterator<Item = &SearchEngineMapping> {
        self.mappings.values()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(id: u32, name: &str) -> SearchEngineMapping {
        SearchEngineMapping {
            id,
            name: name.into(),
            url_template: "https://search.test/?q={{formattedSearch}}&n={{numResults}}".into(),
            result_marker: "result-title".into(),
        }
    }

    #[test]
    fn builtin_has_three_engines() {
        let registry = EngineRegistry::builtin();
        assert_eq!(registry.len(), 3);
        let names: Vec<&str> = registry.engines().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Google", "Bing", "Yahoo"]);
    }

    #[test]
    fn builtin_passes_validation() {
        let registry = EngineRegistry::new(crate::engines::builtin());
        assert!(registry.is_ok());
    }

    #[test]
    fn lookup_known_engine() {
        let registry = EngineRegistry::builtin();
        let google = registry.lookup(1).expect("google mapped");
        assert_eq!(google.name, "Google");
    }

    #[test]
    fn lookup_unknown_engine_reports_raw_code() {
        let registry = EngineRegistry::builtin();
        let err = registry.lookup(17).unwrap_err();
        assert!(matches!(err, SearchError::UnknownEngine(ref label) if label == "17"));
    }

    #[test]
    fn lookup_unassigned_engine_reports_label() {
        let registry = EngineRegistry::builtin();
        let err = registry.lookup(0).unwrap_err();
        assert!(err.to_string().contains("Unassigned"));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = EngineRegistry::new(vec![mapping(4, "A"), mapping(4, "B")]).unwrap_err();
        assert!(err.to_string().contains("both 'A' and 'B'"));
    }

    #[test]
    fn reserved_id_rejected() {
        assert!(EngineRegistry::new(vec![mapping(0, "Zero")]).is_err());
    }

    #[test]
    fn empty_marker_rejected() {
        let mut m = mapping(5, "Blank");
        m.result_marker.clear();
        assert!(EngineRegistry::new(vec![m]).is_err());
    }

    #[test]
    fn template_without_phrase_rejected() {
        let mut m = mapping(5, "NoPhrase");
        m.url_template = "https://search.test/?n={{numResults}}".into();
        let err = EngineRegistry::new(vec![m]).unwrap_err();
        assert!(err.to_string().contains("formattedSearch"));
    }

    #[test]
    fn synthetic_registry_lookup() {
        let registry = EngineRegistry::new(vec![mapping(8, "Synthetic")]).expect("valid");
        assert_eq!(registry.lookup(8).expect("mapped").name, "Synthetic");
        assert!(registry.lookup(1).is_err());
    }

    #[test]
    fn build_url_substitutes_both_placeholders() {
        let url = mapping(1, "T").build_url("e-Settlements", 100);
        assert_eq!(url, "https://search.test/?q=e-Settlements&n=100");
    }

    #[test]
    fn build_url_encodes_reserved_characters() {
        let url = mapping(1, "T").build_url("a&b=c d", 5);
        assert_eq!(url, "https://search.test/?q=a%26b%3Dc+d&n=5");
    }
}
