use ratatui::text::Span;

use crate::util::unicode;

/// Checkbox symbol for a todo (markdown checkbox style)
pub(super) fn checkbox(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Insert a `▌` cursor glyph at byte offset `cursor`
pub(super) fn with_cursor_glyph(text: &str, cursor: usize) -> String {
    let cursor = cursor.min(text.len());
    format!("{}\u{258C}{}", &text[..cursor], &text[cursor..])
}
