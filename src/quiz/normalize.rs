//! Source text normalization.
//!
//! Slide decks repeat headers and footers on every page; deduplicating
//! whole lines before prompting keeps that boilerplate from crowding out
//! the actual content within the word budget.

use std::collections::HashSet;

/// Default cap on the number of whitespace-delimited tokens kept.
pub const DEFAULT_MAX_WORDS: usize = 600;

/// Collapse extracted raw text into a bounded, deduplicated prompt body.
///
/// Exact duplicate lines are removed (first occurrence wins, order
/// preserved), survivors are joined with single spaces, and the result is
/// truncated to the first `max_words` tokens. Empty input yields empty
/// output; callers treat that as a generation failure upstream.
pub fn normalize(raw: &str, max_words: usize) -> String {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for line in raw.lines() {
        if seen.insert(line) {
            lines.push(line);
        }
    }
    lines
        .join(" ")
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
