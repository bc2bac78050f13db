//! Marker-based result extraction from raw search-results HTML.
//!
//! The scan is plain substring search, not an HTML parser: it knows
//! nothing about nesting, attributes, or entities. For every marker hit it
//! takes the text between the next `>` and the following `<`. This
//! looseness is the contract results are compared against, so it must not
//! be "fixed" here. Known limitation: markup that wraps the display text in
//! another element (e.g. `<cite>`) yields an empty candidate, which is then
//! dropped.

use crate::error::SearchError;

/// Opening of the body tag; everything before it is discarded.
const BODY_OPEN: &str = "<body";

/// Result of scanning a page for an engine's marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The marker never occurs in the body. Not an error: the caller reports
    /// zero results.
    MarkerAbsent,
    /// The marker occurs at least once.
    Found {
        /// Number of marker hits, including ones that produced no entry.
        occurrences: usize,
        /// Non-empty entries in document order; index + 1 is the rank.
        results: Vec<String>,
    },
}

impl Extraction {
    /// Extracted entries, empty when the marker was absent.
    pub fn results(&self) -> &[String] {
        match self {
            Self::MarkerAbsent => &[],
            Self::Found { results, .. } => results,
        }
    }

    pub fn marker_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Slice of `html` starting at the first `<body`.
///
/// # Errors
///
/// Returns [`SearchError::NoBodyFound`] if the document has no body tag.
pub fn body_of(html: &str) -> Result<&str, SearchError> {
    html.find(BODY_OPEN)
        .map(|start| &html[start..])
        .ok_or(SearchError::NoBodyFound)
}

/// Scan `html` for `marker` and collect the result entries.
///
/// # Errors
///
/// Returns [`SearchError::NoBodyFound`] when the page has no `<body`.
///
/// # Examples
///
/// ```
/// use seorank_search::orchestrator::extract::extract_results;
///
/// let html = "<head>hit>ignored<</head><body><p hit>one.com</p><p hit>two.com</p></body>";
/// let extraction = extract_results(html, "hit").unwrap();
/// assert_eq!(extraction.results(), ["one.com", "two.com"]);
/// ```
pub fn extract_results(html: &str, marker: &str) -> Result<Extraction, SearchError> {
    let body = body_of(html)?;
    if marker.is_empty() || !body.contains(marker) {
        tracing::debug!("result marker absent from page body");
        return Ok(Extraction::MarkerAbsent);
    }

    let occurrences = body.matches(marker).count();
    let results: Vec<String> = MarkerEntries::new(body, marker)
        .map(str::to_owned)
        .collect();

    tracing::debug!(occurrences, count = results.len(), "results extracted");
    Ok(Extraction::Found {
        occurrences,
        results,
    })
}

/// Iterator over the trimmed, non-empty entry texts following each marker
/// hit in `html`.
///
/// Restartable by constructing a new one; holds no state beyond the scan
/// cursor.
#[derive(Debug, Clone)]
pub struct MarkerEntries<'a> {
    html: &'a str,
    marker: &'a str,
    cursor: usize,
}

impl<'a> MarkerEntries<'a> {
    pub fn new(html: &'a str, marker: &'a str) -> Self {
        Self {
            html,
            marker,
            cursor: 0,
        }
    }
}

impl<'a> Iterator for MarkerEntries<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.marker.is_empty() {
            return None;
        }
        loop {
            let hit = self.cursor + self.html.get(self.cursor..)?.find(self.marker)?;
            let after_marker = hit + self.marker.len();
            self.cursor = after_marker;

            // Malformed fragments (no closing '>' or no following '<') are skipped.
            let Some(open) = find_from(self.html, after_marker, '>') else {
                continue;
            };
            let Some(close) = find_from(self.html, open + 1, '<') else {
                continue;
            };

            let entry = self.html[open + 1..close].trim();
            if !entry.is_empty() {
                return Some(entry);
            }
        }
    }
}

fn find_from(haystack: &str, from: usize, needle: char) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|i| from + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(html: &str, marker: &str) -> Vec<String> {
        extract_results(html, marker)
            .expect("body present")
            .results()
            .to_vec()
    }

    #[test]
    fn missing_body_is_an_error() {
        let err = extract_results("<html><p class=\"hit\">a.com</p></html>", "hit").unwrap_err();
        assert!(matches!(err, SearchError::NoBodyFound));
    }

    #[test]
    fn empty_document_is_an_error() {
        assert!(matches!(
            extract_results("", "hit"),
            Err(SearchError::NoBodyFound)
        ));
    }

    #[test]
    fn content_before_body_ignored() {
        let html = r#"<head><meta hit>head.com</meta></head><body><i hit>body.com</i></body>"#;
        assert_eq!(found(html, "hit"), vec!["body.com"]);
    }

    #[test]
    fn marker_only_in_head_is_absent() {
        let html = r#"<head><style>.hit{}</style><x hit>nope<</head><body>plain</body>"#;
        assert_eq!(
            extract_results(html, "hit").expect("body present"),
            Extraction::MarkerAbsent
        );
    }

    #[test]
    fn body_with_attributes_detected() {
        let html = r#"<body class="srp"><span hit>a.com</span></body>"#;
        assert_eq!(found(html, "hit"), vec!["a.com"]);
    }

    #[test]
    fn k_occurrences_yield_k_entries_in_order() {
        let html = "<body>\
            <div hit>first.com</div>\
            <div hit>second.com</div>\
            <div hit>third.com</div>\
            <div hit>fourth.com</div></body>";
        let extraction = extract_results(html, "hit").expect("body present");
        assert_eq!(
            extraction,
            Extraction::Found {
                occurrences: 4,
                results: vec![
                    "first.com".to_owned(),
                    "second.com".to_owned(),
                    "third.com".to_owned(),
                    "fourth.com".to_owned(),
                ],
            }
        );
    }

    #[test]
    fn entries_are_trimmed() {
        let html = "<body><p hit>\n   spaced.com  \t</p></body>";
        assert_eq!(found(html, "hit"), vec!["spaced.com"]);
    }

    #[test]
    fn whitespace_only_entries_dropped() {
        let html = "<body><p hit>   </p><p hit>kept.com</p><p hit><b>x</b></p></body>";
        let extraction = extract_results(html, "hit").expect("body present");
        assert_eq!(
            extraction,
            Extraction::Found {
                occurrences: 3,
                results: vec!["kept.com".to_owned()],
            }
        );
    }

    #[test]
    fn missing_closing_delimiter_skipped() {
        // Second hit has a '>' but no '<' after it.
        let html = "<body><p hit>ok.com</p><p hit>dangling";
        assert_eq!(found(html, "hit"), vec!["ok.com"]);
    }

    #[test]
    fn missing_open_delimiter_skipped() {
        let html = "<body><p hit>ok.com</p> trailing hit";
        assert_eq!(found(html, "hit"), vec!["ok.com"]);
    }

    #[test]
    fn marker_inside_text_still_counts() {
        // No tag awareness: the marker can match anywhere.
        let html = "<body><p>see hit here</p>next.com<</body>";
        assert_eq!(found(html, "hit"), vec!["next.com"]);
    }

    #[test]
    fn adjacent_markers_advance_by_marker_length() {
        let html = "<body><p aaaa>x.com</p></body>";
        let extraction = extract_results(html, "aa").expect("body present");
        // "aaaa" holds two non-overlapping hits; both reach the same span.
        assert_eq!(
            extraction,
            Extraction::Found {
                occurrences: 2,
                results: vec!["x.com".to_owned(), "x.com".to_owned()],
            }
        );
    }

    #[test]
    fn delimiter_search_starts_after_marker() {
        // A marker that itself ends in '>' uses the next '>' after it.
        let html = "<body><a tag>one.com</a>two.com<</body>";
        assert_eq!(found(html, "tag>"), vec!["two.com"]);
    }

    #[test]
    fn empty_marker_is_absent() {
        assert_eq!(
            extract_results("<body>anything</body>", "").expect("body present"),
            Extraction::MarkerAbsent
        );
        assert_eq!(MarkerEntries::new("<body>x</body>", "").count(), 0);
    }

    #[test]
    fn iterator_is_restartable() {
        let body = "<body><p hit>a.com</p><p hit>b.com</p></body>";
        let first: Vec<&str> = MarkerEntries::new(body, "hit").collect();
        let second: Vec<&str> = MarkerEntries::new(body, "hit").collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["a.com", "b.com"]);
    }

    #[test]
    fn multibyte_text_handled() {
        let html = "<body><p hit>sympli.com.au › e-settlements</p><p hit>日本.jp</p></body>";
        assert_eq!(
            found(html, "hit"),
            vec!["sympli.com.au › e-settlements", "日本.jp"]
        );
    }

    #[test]
    fn two_marker_scenario() {
        let html = "<body><a>xMARKy</a>z>r1<w MARK>r2<e></body>";
        let extraction = extract_results(html, "MARK").expect("body present");
        let Extraction::Found { occurrences, results } = extraction else {
            panic!("marker present");
        };
        assert_eq!(occurrences, 2);
        assert_eq!(results.len(), 2);
        // The first hit's span runs from the '>' closing `</a>` to `<w`.
        assert_eq!(results[0], "z>r1");
        assert_eq!(results[1], "r2");
    }
}
