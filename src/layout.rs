//! Single-row layout: prompt + query first, then matching candidates
//! left-to-right until the width budget runs out.
//!
//! Output is a plain draw plan (text, x offset, highlight flag) so the same
//! layout drives any presenter; nothing in here touches the terminal.

use crate::store::CandidateStore;

/// Padding on each side of a candidate span, in layout units. The highlight
/// rectangle covers the padding, the text starts one pad in.
pub const PAD: u16 = 1;

/// Width of a string in layout units (terminal backend: display columns).
pub trait TextMetrics {
    fn width(&self, text: &str) -> u16;
}

/// One positioned, styled piece of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    /// Where the text itself starts; a highlighted span's background extends
    /// `PAD` units on both sides of it.
    pub x: u16,
    pub highlighted: bool,
}

/// Lay out one row: the `prompt`+`query` span at the left edge, then view
/// entries in order until the running x cursor meets or exceeds `row_width`.
///
/// The cutoff is checked against the cursor *before* measuring the next
/// candidate, so items are omitted whole, never clipped mid-text. The
/// prompt/query span is always emitted, even when it alone overflows the row.
pub fn layout(
    prompt: &str,
    query: &str,
    store: &CandidateStore,
    view: &[usize],
    selected: Option<usize>,
    row_width: u16,
    metrics: &dyn TextMetrics,
) -> Vec<Span> {
    let mut spans = Vec::with_capacity(view.len() + 1);

    let header = format!("{prompt}{query}");
    let mut x = metrics.width(&header).saturating_add(PAD);
    spans.push(Span {
        text: header,
        x: 0,
        highlighted: false,
    });

    for (pos, &idx) in view.iter().enumerate() {
        if x >= row_width {
            break;
        }
        let Some(text) = store.get(idx) else {
            // stale index; the state machine never produces one
            break;
        };
        let w = metrics.width(text).saturating_add(2 * PAD);
        spans.push(Span {
            text: text.to_string(),
            x: x.saturating_add(PAD),
            highlighted: selected == Some(pos),
        });
        x = x.saturating_add(w);
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One unit per char — keeps expected offsets easy to read.
    struct CharWidth;

    impl TextMetrics for CharWidth {
        fn width(&self, text: &str) -> u16 {
            text.chars().count() as u16
        }
    }

    fn store(items: &[&str]) -> CandidateStore {
        CandidateStore::load(items.iter().copied()).unwrap()
    }

    #[test]
    fn header_comes_first_then_candidates_in_view_order() {
        let s = store(&["apple", "grape"]);
        let plan = layout(">> ", "ap", &s, &[0, 1], Some(0), 200, &CharWidth);

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].text, ">> ap");
        assert_eq!(plan[0].x, 0);
        assert!(!plan[0].highlighted);

        // header is 5 wide, +PAD → cursor 6; text starts one pad further in
        assert_eq!(plan[1].text, "apple");
        assert_eq!(plan[1].x, 7);
        assert!(plan[1].highlighted);

        // "apple" consumed 5 + 2*PAD = 7 → cursor 13
        assert_eq!(plan[2].text, "grape");
        assert_eq!(plan[2].x, 14);
        assert!(!plan[2].highlighted);
    }

    #[test]
    fn highlight_follows_the_selection() {
        let s = store(&["a", "b", "c"]);
        let plan = layout(">> ", "", &s, &[0, 1, 2], Some(2), 200, &CharWidth);
        let highlighted: Vec<&str> = plan
            .iter()
            .filter(|sp| sp.highlighted)
            .map(|sp| sp.text.as_str())
            .collect();
        assert_eq!(highlighted, vec!["c"]);
    }

    #[test]
    fn stops_once_the_cursor_reaches_the_budget() {
        let s = store(&["aaaa", "bbbb", "cccc"]);
        // header ">> " = 3 wide, cursor 4; "aaaa" costs 6 → cursor 10 ≥ 10
        let plan = layout(">> ", "", &s, &[0, 1, 2], Some(0), 10, &CharWidth);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1].text, "aaaa");
    }

    #[test]
    fn cutoff_uses_prior_cumulative_width_not_the_next_item() {
        let s = store(&["ab", "this-one-is-very-long"]);
        // cursor after header(3)+PAD = 4, after "ab" = 4+4 = 8 < 20, so the
        // long item is still appended; only the item after it would be cut
        let plan = layout(">> ", "", &s, &[0, 1], Some(0), 20, &CharWidth);
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn empty_view_yields_only_the_header() {
        let s = store(&["apple"]);
        let plan = layout(">> ", "zzz", &s, &[], None, 200, &CharWidth);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].text, ">> zzz");
    }

    #[test]
    fn oversized_header_yields_no_candidate_spans() {
        let s = store(&["apple", "banana"]);
        let query = "x".repeat(50);
        let plan = layout(">> ", &query, &s, &[0, 1], Some(0), 20, &CharWidth);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn every_span_was_appended_within_budget() {
        let s = store(&["alpha", "beta", "gamma", "delta", "epsilon"]);
        let view: Vec<usize> = (0..5).collect();
        for width in [0u16, 5, 12, 30, 80] {
            let plan = layout(">> ", "a", &s, &view, Some(0), width, &CharWidth);
            // replay the cursor: each candidate span must have been placed
            // while the cursor was still inside the budget
            let mut x = CharWidth.width(&plan[0].text) + PAD;
            for span in &plan[1..] {
                assert!(x < width, "span {:?} placed past the budget", span.text);
                assert_eq!(span.x, x + PAD);
                x += CharWidth.width(&span.text) + 2 * PAD;
            }
        }
    }

    #[test]
    fn empty_candidate_still_gets_a_span() {
        let s = store(&[""]);
        let plan = layout(">> ", "", &s, &[0], Some(0), 40, &CharWidth);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1].text, "");
        assert!(plan[1].highlighted);
    }
}
