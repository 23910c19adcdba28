//! The interaction loop: keys in, repaints out, one committed candidate (or
//! nothing) at the end.
//!
//! The loop is single-threaded and event-driven — it blocks on the key
//! source, runs one classify → transition → recompute → repaint cycle per
//! event, and only Confirm or Cancel get it out. The terminal side lives
//! behind [`KeySource`] / [`Presenter`] / [`TextMetrics`], so the whole loop
//! runs under test with scripted fakes.

use std::io;

use crate::filter::MatchOptions;
use crate::layout::{layout, Span, TextMetrics};
use crate::state::MenuState;
use crate::store::CandidateStore;

/// Logical key, already classified by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character to append to the query.
    Char(char),
    /// Erase the last query character (no-op at the prompt boundary).
    Backspace,
    /// Cycle the highlight forward (wraps past the last match).
    Advance,
    /// Cycle the highlight backward (wraps before the first match).
    Retreat,
    /// Commit the highlighted candidate; cancels if nothing is highlighted.
    Confirm,
    /// Leave without committing anything.
    Cancel,
    /// Repaint without touching any state (expose/resize).
    Redraw,
    /// Anything unrecognized; the loop stays live and does nothing.
    Ignore,
}

/// Blocking source of classified keys.
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<Key>;
}

/// Paints one draw plan to wherever the menu lives.
pub trait Presenter {
    fn present(&mut self, plan: &[Span]) -> io::Result<()>;
}

/// Picker configuration, assembled once from the CLI.
#[derive(Debug, Clone)]
pub struct MenuOptions {
    /// Constant, non-editable prefix shown before the typed filter text.
    pub prompt: String,
    /// Width budget for the row, in layout units.
    pub row_width: u16,
    pub matching: MatchOptions,
}

impl Default for MenuOptions {
    fn default() -> Self {
        MenuOptions {
            prompt: ">> ".to_string(),
            row_width: 500,
            matching: MatchOptions::default(),
        }
    }
}

/// Drive the picker until the user confirms or cancels.
///
/// Paints once up front, then once after every state-affecting key. Returns
/// the committed candidate's text, or `None` on cancel — including a Confirm
/// pressed while the filtered view is empty.
pub fn run(
    store: &CandidateStore,
    opts: &MenuOptions,
    keys: &mut dyn KeySource,
    metrics: &dyn TextMetrics,
    presenter: &mut dyn Presenter,
) -> io::Result<Option<String>> {
    let mut state = MenuState::new(store, &opts.matching);
    repaint(store, opts, &state, metrics, presenter)?;

    loop {
        match keys.next_key()? {
            Key::Ignore => continue,
            Key::Redraw => {}
            Key::Char(ch) => {
                state.push_char(ch, store, &opts.matching);
            }
            Key::Backspace => {
                state.backspace(store, &opts.matching);
            }
            Key::Advance => state.advance(),
            Key::Retreat => state.retreat(),
            Key::Confirm => {
                let committed = state.selected_text(store).map(str::to_string);
                match &committed {
                    Some(text) => log::debug!("committed {text:?}"),
                    None => log::debug!("confirm with empty view, cancelling"),
                }
                return Ok(committed);
            }
            Key::Cancel => {
                log::debug!("cancelled");
                return Ok(None);
            }
        }
        repaint(store, opts, &state, metrics, presenter)?;
    }
}

fn repaint(
    store: &CandidateStore,
    opts: &MenuOptions,
    state: &MenuState,
    metrics: &dyn TextMetrics,
    presenter: &mut dyn Presenter,
) -> io::Result<()> {
    let plan = layout(
        &opts.prompt,
        state.query(),
        store,
        state.view(),
        state.selected(),
        opts.row_width,
        metrics,
    );
    presenter.present(&plan)
}
