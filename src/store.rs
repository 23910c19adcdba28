//! Candidate storage.
//!
//! Candidates are loaded once (normally from stdin), kept in input order, and
//! never mutated afterwards. Everything downstream — the filter, the selection
//! state, the layout — refers to candidates by their index in this store.

use thiserror::Error;

/// Most candidates a store will accept.
pub const MAX_CANDIDATES: usize = 8192;

/// Longest single candidate line, in bytes.
pub const MAX_LINE_LEN: usize = 8192;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Too many candidates, or one candidate line too long. Loading fails
    /// outright rather than silently dropping the overflow.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),
}

/// Ordered, immutable-after-load sequence of candidate strings.
///
/// Duplicate lines are kept as distinct entries; empty lines are valid
/// candidates. Selection tracks positions, not text, so duplicates stay
/// individually selectable.
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    items: Vec<String>,
}

impl CandidateStore {
    /// Build a store from raw input lines, preserving order.
    ///
    /// Trailing `\n` / `\r\n` terminators are stripped; no other trimming or
    /// deduplication happens.
    pub fn load<I>(lines: I) -> Result<Self, LoadError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut items = Vec::new();
        for line in lines {
            let mut line: String = line.into();
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            if line.len() > MAX_LINE_LEN {
                return Err(LoadError::CapacityExceeded(format!(
                    "candidate line is {} bytes, limit is {MAX_LINE_LEN}",
                    line.len()
                )));
            }
            if items.len() == MAX_CANDIDATES {
                return Err(LoadError::CapacityExceeded(format!(
                    "more than {MAX_CANDIDATES} candidate lines"
                )));
            }
            items.push(line);
        }
        Ok(CandidateStore { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Candidate text at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}
