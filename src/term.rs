//! Crossterm backend: raw-mode lifetime, key classification, column metrics,
//! and the single-line renderer.
//!
//! The menu row is drawn on stderr so stdout stays clean for the committed
//! result (`choice=$(ls | pickline)`). Crossterm reads key events from the
//! controlling tty, so piping candidates into stdin does not steal the
//! keyboard.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{self, Stylize},
    terminal, ExecutableCommand, QueueableCommand,
};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::layout::{Span, TextMetrics, PAD};
use crate::menu::{self, Key, KeySource, MenuOptions, Presenter};
use crate::store::CandidateStore;

/// Current terminal width in columns, for the `--width` default.
pub fn default_row_width() -> u16 {
    terminal::size().map(|(w, _)| w).unwrap_or(80)
}

/// Enter raw mode and disable line wrap; restores both when dropped.
struct RawGuard;

impl RawGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // a span ending at the last column must clip, not wrap the row
        io::stderr().execute(terminal::DisableLineWrap)?;
        Ok(RawGuard)
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        let _ = io::stderr().execute(terminal::EnableLineWrap);
        let _ = terminal::disable_raw_mode();
    }
}

// ── key classification ───────────────────────────────────────────────────

/// Map a crossterm event onto the picker's logical keys.
///
/// Unknown events classify as `Ignore` — the loop must stay live no matter
/// what the terminal delivers.
fn classify(event: &Event) -> Key {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return Key::Ignore;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return match key.code {
                    KeyCode::Char('c') => Key::Cancel,
                    _ => Key::Ignore,
                };
            }
            if key.modifiers.contains(KeyModifiers::ALT) {
                return Key::Ignore;
            }
            match key.code {
                KeyCode::Esc => Key::Cancel,
                KeyCode::Enter => Key::Confirm,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Tab => Key::Advance,
                KeyCode::BackTab => Key::Retreat,
                KeyCode::Char(c) => Key::Char(c),
                _ => Key::Ignore,
            }
        }
        Event::Resize(..) => Key::Redraw,
        _ => Key::Ignore,
    }
}

/// Blocking key source over `crossterm::event::read`.
struct TermKeys;

impl KeySource for TermKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        Ok(classify(&event::read()?))
    }
}

// ── metrics and rendering ────────────────────────────────────────────────

/// Text width in display columns (wide CJK glyphs count as two).
struct CellMetrics;

impl TextMetrics for CellMetrics {
    fn width(&self, text: &str) -> u16 {
        UnicodeWidthStr::width(text).min(u16::MAX as usize) as u16
    }
}

/// Paints a draw plan on the current stderr line.
struct LineRenderer {
    out: io::Stderr,
}

impl LineRenderer {
    fn new() -> Self {
        LineRenderer { out: io::stderr() }
    }
}

impl Presenter for LineRenderer {
    fn present(&mut self, plan: &[Span]) -> io::Result<()> {
        self.out.queue(cursor::MoveToColumn(0))?;
        self.out
            .queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

        for span in plan {
            if span.highlighted {
                // the highlight background covers the padding on both sides
                self.out
                    .queue(cursor::MoveToColumn(span.x.saturating_sub(PAD)))?;
                let padded = format!(" {} ", span.text);
                self.out
                    .queue(style::PrintStyledContent(padded.black().on_green()))?;
            } else {
                self.out.queue(cursor::MoveToColumn(span.x))?;
                self.out.queue(style::Print(span.text.as_str()))?;
            }
        }

        // park the cursor right after the typed query
        if let Some(header) = plan.first() {
            let col = CellMetrics.width(&header.text);
            self.out.queue(cursor::MoveToColumn(col))?;
        }
        self.out.flush()
    }
}

// ── entry point ──────────────────────────────────────────────────────────

/// Run the picker on the terminal. Returns the committed candidate text, or
/// `None` if the user cancelled (or confirmed with nothing to select).
pub fn pick(store: &CandidateStore, opts: &MenuOptions) -> Result<Option<String>, String> {
    pick_inner(store, opts).map_err(|e| e.to_string())
}

fn pick_inner(store: &CandidateStore, opts: &MenuOptions) -> io::Result<Option<String>> {
    let _guard = RawGuard::enter()?;
    let mut keys = TermKeys;
    let mut renderer = LineRenderer::new();
    let result = menu::run(store, opts, &mut keys, &CellMetrics, &mut renderer);

    // wipe the picker row before handing the terminal back
    let mut out = io::stderr();
    out.queue(cursor::MoveToColumn(0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.flush()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn classifies_the_core_bindings() {
        assert_eq!(classify(&key(KeyCode::Esc)), Key::Cancel);
        assert_eq!(classify(&key(KeyCode::Enter)), Key::Confirm);
        assert_eq!(classify(&key(KeyCode::Backspace)), Key::Backspace);
        assert_eq!(classify(&key(KeyCode::Tab)), Key::Advance);
        assert_eq!(classify(&key(KeyCode::BackTab)), Key::Retreat);
        assert_eq!(classify(&key(KeyCode::Char('a'))), Key::Char('a'));
    }

    #[test]
    fn shift_tab_arrives_as_backtab() {
        // terminals report shift-tab as its own keycode; shift on a char
        // key just changes the char
        assert_eq!(
            classify(&key_with(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Key::Retreat
        );
        assert_eq!(
            classify(&key_with(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Key::Char('A')
        );
    }

    #[test]
    fn alt_chords_are_ignored() {
        assert_eq!(
            classify(&key_with(KeyCode::Char('x'), KeyModifiers::ALT)),
            Key::Ignore
        );
    }

    #[test]
    fn ctrl_c_cancels_other_ctrl_chords_are_ignored() {
        assert_eq!(
            classify(&key_with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Key::Cancel
        );
        assert_eq!(
            classify(&key_with(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            Key::Ignore
        );
    }

    #[test]
    fn resize_asks_for_a_redraw() {
        assert_eq!(classify(&Event::Resize(80, 24)), Key::Redraw);
    }

    #[test]
    fn unhandled_keys_are_ignored_not_fatal() {
        assert_eq!(classify(&key(KeyCode::Left)), Key::Ignore);
        assert_eq!(classify(&key(KeyCode::F(5))), Key::Ignore);
        assert_eq!(classify(&key(KeyCode::Home)), Key::Ignore);
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut ev = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert_eq!(classify(&Event::Key(ev)), Key::Ignore);
    }

    #[test]
    fn cell_metrics_counts_display_columns() {
        assert_eq!(CellMetrics.width("apple"), 5);
        assert_eq!(CellMetrics.width(""), 0);
        assert_eq!(CellMetrics.width("日本"), 4); // wide glyphs are two columns
    }
}
