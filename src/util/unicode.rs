use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_display_width).sum()
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = grapheme_display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Center `s` in a field `cells` wide. Extra padding goes on the left.
pub fn center_to_width(s: &str, cells: usize) -> String {
    let w = display_width(s);
    if w >= cells {
        return s.to_string();
    }
    let total = cells - w;
    let right = total / 2;
    let left = total - right;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Next grapheme boundary after `byte_offset`. Returns None if at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    match s[byte_offset..].grapheme_indices(true).nth(1) {
        Some((i, _)) => Some(byte_offset + i),
        None => Some(s.len()),
    }
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
}

/// Convert byte offset to display column (terminal cells).
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

/// Convert display column to byte offset, snapping to grapheme boundary.
/// If `target_col` falls within a wide character, returns the byte offset
/// of that character's start. If beyond the string, returns `s.len()`.
pub fn display_col_to_byte_offset(s: &str, target_col: usize) -> usize {
    let mut col = 0;
    for (i, g) in s.grapheme_indices(true) {
        let gw = grapheme_display_width(g);
        if col + gw > target_col {
            return i;
        }
        col += gw;
    }
    s.len()
}

/// Display width of a grapheme cluster.
fn grapheme_display_width(g: &str) -> usize {
    if g == "\t" {
        return 4;
    }
    UnicodeWidthStr::width(g)
}
