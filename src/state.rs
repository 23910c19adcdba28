//! Query buffer, filtered view, and selection cursor.
//!
//! One `MenuState` per picker run, owned by the interaction loop. Every
//! transition here is total: out-of-range and empty-view cases are defined
//! no-ops, never errors.
//!
//! Two policies are deliberate and load-bearing:
//! - any query mutation resets the selection to the first match (the previous
//!   selection may not have survived the refilter, so it is never preserved);
//! - Advance/Retreat cycle with wraparound instead of clamping at the ends.

use crate::filter::{filter, MatchOptions};
use crate::store::CandidateStore;

/// Most characters a query will accept; typing past this is a no-op.
pub const MAX_QUERY_LEN: usize = 512;

/// Mutable picker state: what the user typed, which candidates survive, and
/// which survivor is highlighted.
#[derive(Debug)]
pub struct MenuState {
    query: String,
    view: Vec<usize>,
    selected: Option<usize>,
}

impl MenuState {
    /// Initial state: empty query, view per the match-all policy, first
    /// survivor selected (or no selection if the view starts empty).
    pub fn new(store: &CandidateStore, opts: &MatchOptions) -> Self {
        let mut state = MenuState {
            query: String::new(),
            view: Vec::new(),
            selected: None,
        };
        state.refilter(store, opts);
        state
    }

    /// The user-typed filter text (prompt not included).
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Store indices of the candidates matching the current query.
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    /// Position of the highlighted candidate within the view.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Text of the highlighted candidate.
    pub fn selected_text<'s>(&self, store: &'s CandidateStore) -> Option<&'s str> {
        let pos = self.selected?;
        let idx = *self.view.get(pos)?;
        store.get(idx)
    }

    /// Append a typed character to the query and refilter.
    /// Returns whether the query actually changed.
    pub fn push_char(&mut self, ch: char, store: &CandidateStore, opts: &MatchOptions) -> bool {
        if self.query.chars().count() >= MAX_QUERY_LEN {
            return false;
        }
        self.query.push(ch);
        self.refilter(store, opts);
        true
    }

    /// Erase the last typed character and refilter.
    /// Returns whether the query actually changed (false at the prompt
    /// boundary, i.e. when the query is already empty).
    pub fn backspace(&mut self, store: &CandidateStore, opts: &MatchOptions) -> bool {
        if self.query.pop().is_none() {
            return false;
        }
        self.refilter(store, opts);
        true
    }

    /// Move the highlight one candidate forward, wrapping past the end.
    pub fn advance(&mut self) {
        if let Some(pos) = self.selected {
            self.selected = Some((pos + 1) % self.view.len());
        }
    }

    /// Move the highlight one candidate back, wrapping before the start.
    pub fn retreat(&mut self) {
        if let Some(pos) = self.selected {
            let len = self.view.len();
            self.selected = Some((pos + len - 1) % len);
        }
    }

    fn refilter(&mut self, store: &CandidateStore, opts: &MatchOptions) {
        self.view = filter(store, &self.query, opts);
        self.selected = if self.view.is_empty() { None } else { Some(0) };
    }
}
