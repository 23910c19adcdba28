//! Incremental substring filter over the candidate store.
//!
//! Pure function of (store, query, options): same inputs, same output. The
//! filtered view is a list of store indices so the caller never copies
//! candidate text just to narrow the list.

use crate::store::CandidateStore;

/// Matching knobs, set once from the CLI.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Compare query and candidates without case folding.
    pub case_sensitive: bool,
    /// An empty query matches every candidate (default). When off, an empty
    /// query matches nothing and the row shows only the prompt.
    pub match_all_on_empty: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            case_sensitive: false,
            match_all_on_empty: true,
        }
    }
}

/// Indices of candidates whose text contains `query`, in store order.
///
/// No ranking or scoring: relative order among matches is the input order.
/// Linear in store size; each candidate is scanned once per call.
pub fn filter(store: &CandidateStore, query: &str, opts: &MatchOptions) -> Vec<usize> {
    if query.is_empty() {
        if opts.match_all_on_empty {
            return (0..store.len()).collect();
        }
        return Vec::new();
    }

    if opts.case_sensitive {
        return store
            .iter()
            .enumerate()
            .filter(|(_, text)| text.contains(query))
            .map(|(i, _)| i)
            .collect();
    }

    let needle = query.to_lowercase();
    store
        .iter()
        .enumerate()
        .filter(|(_, text)| text.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}
