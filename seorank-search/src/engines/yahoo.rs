//! Yahoo: display URLs sit in a span with a long utility-class list.

use crate::engine::SearchEngineMapping;

/// Engine code clients send as `engineTypeId`.
pub const ID: u32 = 3;

pub fn mapping() -> SearchEngineMapping {
    SearchEngineMapping {
        id: ID,
        name: "Yahoo".into(),
        url_template: "https://search.yahoo.com/search?p={{formattedSearch}}&n={{numResults}}"
            .into(),
        result_marker: "fz-ms fw-m fc-12th wr-bw lh-17".into(),
    }
}
