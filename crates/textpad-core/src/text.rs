//! Offset, line and cell-width helpers over a [`Rope`].

use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Number of cells a tab character occupies when rendered.
pub const TAB_WIDTH: usize = 4;

/// Cell width of a single character (tabs expand to [`TAB_WIDTH`]).
pub fn char_cell_width(ch: char) -> usize {
    if ch == '\t' {
        return TAB_WIDTH;
    }
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Length of a line in chars, not counting its trailing line break.
pub fn line_content_len(rope: &Rope, line_idx: usize) -> usize {
    let line = rope.line(line_idx);
    let mut len = line.len_chars();
    if len > 0 && is_line_break(line.char(len - 1)) {
        len -= 1;
        if len > 0 && line.char(len) == '\n' && line.char(len - 1) == '\r' {
            len -= 1;
        }
    }
    len
}

/// Converts a char offset into `(line, column)` (both 0-based, column in chars).
pub fn offset_to_line_col(rope: &Rope, offset: usize) -> (usize, usize) {
    let offset = offset.min(rope.len_chars());
    let line = rope.char_to_line(offset);
    (line, offset - rope.line_to_char(line))
}

/// Converts `(line, column)` into a char offset, clamping the column to the line content.
pub fn line_col_to_offset(rope: &Rope, line: usize, column: usize) -> usize {
    let last_line = rope.len_lines().saturating_sub(1);
    let line = line.min(last_line);
    rope.line_to_char(line) + column.min(line_content_len(rope, line))
}

/// Cell x position of `column` within `line`.
pub fn cell_x(rope: &Rope, line: usize, column: usize) -> usize {
    if line >= rope.len_lines() {
        return 0;
    }
    rope.line(line)
        .chars()
        .take(column)
        .map(char_cell_width)
        .sum()
}

/// Start of the grapheme cluster that ends at `offset`.
pub(crate) fn prev_grapheme_boundary(rope: &Rope, offset: usize) -> usize {
    let offset = offset.min(rope.len_chars());
    if offset == 0 {
        return 0;
    }

    let line = rope.char_to_line(offset);
    let line_start = rope.line_to_char(line);
    if offset == line_start {
        // "\r\n" is one cluster.
        if offset >= 2 && rope.char(offset - 1) == '\n' && rope.char(offset - 2) == '\r' {
            return offset - 2;
        }
        return offset - 1;
    }

    let prefix = rope.slice(line_start..offset).to_string();
    match prefix.graphemes(true).next_back() {
        Some(g) => offset - g.chars().count(),
        None => offset - 1,
    }
}

/// End of the grapheme cluster that starts at `offset`.
pub(crate) fn next_grapheme_boundary(rope: &Rope, offset: usize) -> usize {
    let len = rope.len_chars();
    if offset >= len {
        return len;
    }

    let line = rope.char_to_line(offset);
    let line_end = rope.line_to_char(line) + rope.line(line).len_chars();
    let suffix = rope.slice(offset..line_end).to_string();
    match suffix.graphemes(true).next() {
        Some(g) => offset + g.chars().count(),
        None => offset + 1,
    }
}
