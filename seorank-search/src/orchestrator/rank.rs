//! Target-domain normalisation and rank matching.
//!
//! Matching is deliberately loose: an entry matches when its lower-cased
//! text *contains* the normalised domain anywhere. `notsympli.com.au`
//! therefore matches `sympli.com.au`. Reports are compared against this
//! behaviour, so it is kept as-is.

/// Prefixes stripped from the start of a target domain, in this order.
const STRIPPED_PREFIXES: &[&str] = &["http://", "https://", "www."];

/// Normalise a user-supplied target domain for matching and cache keys.
///
/// Trims surrounding whitespace, lower-cases, then strips a leading
/// `http://`, `https://` and `www.` in that order, each at most once.
///
/// # Examples
///
/// ```
/// use seorank_search::orchestrator::rank::normalize_domain;
///
/// assert_eq!(normalize_domain("https://www.Sympli.com.au"), "sympli.com.au");
/// assert_eq!(normalize_domain("sympli.com.au"), "sympli.com.au");
/// ```
pub fn normalize_domain(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut rest = lowered.as_str();
    for prefix in STRIPPED_PREFIXES {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
        }
    }
    rest.to_owned()
}

/// Where a target domain appears in an ordered result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankMatch {
    /// 1-based positions of every match, or `[0]` when nothing matched.
    pub ranks: Vec<usize>,
    /// First matching position.
    pub highest_rank: Option<usize>,
    pub match_count: usize,
}

impl RankMatch {
    fn none() -> Self {
        Self {
            ranks: vec![0],
            highest_rank: None,
            match_count: 0,
        }
    }
}

/// Find every position in `results` whose text contains `normalized_target`.
///
/// `normalized_target` must already be the output of [`normalize_domain`].
pub fn match_ranks<S: AsRef<str>>(results: &[S], normalized_target: &str) -> RankMatch {
    let ranks: Vec<usize> = results
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.as_ref().to_lowercase().contains(normalized_target))
        .map(|(index, _)| index + 1)
        .collect();

    if ranks.is_empty() {
        return RankMatch::none();
    }
    RankMatch {
        highest_rank: ranks.first().copied(),
        match_count: ranks.len(),
        ranks,
    }
}
