//! Rank-check pipeline: marker extraction, domain matching, orchestration.
//!
//! [`extract`] turns a results page into an ordered entry list, [`rank`]
//! finds the target domain in that list, and [`search`] ties both to the
//! engine registry, the fetcher and the result cache.

pub mod extract;
pub mod rank;
pub mod search;
