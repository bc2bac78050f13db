//! Bing: marker is the `b_attribution` class on each result's URL line.
//!
//! Bing nests the display URL inside a `<cite>` element, so the text
//! directly after the marker's tag is usually empty. Only pages where the
//! attribution text is not wrapped (older and some regional layouts)
//! yield entries.

use crate::engine::SearchEngineMapping;

/// Engine code clients send as `engineTypeId`.
pub const ID: u32 = 2;

pub fn mapping() -> SearchEngineMapping {
    SearchEngineMapping {
        id: ID,
        name: "Bing".into(),
        url_template: "http://www.bing.com/search?q={{formattedSearch}}&count={{numResults}}"
            .into(),
        result_marker: "b_attribution".into(),
    }
}
