//! Google: best coverage, but results depend on the basic HTML layout.
//!
//! Without JavaScript Google serves a lightweight page where every result
//! URL is rendered inside a `div` carrying the `BNeawe UPmit AP7Wnd`
//! classes. That class list is the marker.

use crate::engine::SearchEngineMapping;

/// Engine code clients send as `engineTypeId`.
pub const ID: u32 = 1;

pub fn mapping() -> SearchEngineMapping {
    SearchEngineMapping {
        id: ID,
        name: "Google".into(),
        url_template: "https://www.google.com/search?&num={{numResults}}&q={{formattedSearch}}"
            .into(),
        result_marker: "BNeawe UPmit AP7Wnd".into(),
    }
}
