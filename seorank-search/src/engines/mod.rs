//! Built-in search engine mappings.
//!
//! Each module provides the URL template and result marker for one engine,
//! together with fixture tests pinning how its markup scans.

pub mod bing;
pub mod google;
pub mod yahoo;

use crate::engine::SearchEngineMapping;

/// The default engine table, in id order.
pub fn builtin() -> Vec<SearchEngineMapping> {
    vec![google::mapping(), bing::mapping(), yahoo::mapping()]
}
