//! Text box model
//!
//! [`Document`] is the text box: the text itself (a [`Rope`]) and a
//! selection made of an anchor and an active end (`head`, where the caret is drawn). It also
//! implements the default editing behaviour that keys fall through to when they are not
//! shortcuts: typing, deleting, caret movement and select-all.
//!
//! Every mutating method returns whether the text actually changed, so callers can decide when
//! to record history and refresh the character count.

use ropey::Rope;

use crate::commands::CommandError;
use crate::snapshot::TextState;
use crate::text::{
    cell_x, line_col_to_offset, line_content_len, next_grapheme_boundary, offset_to_line_col,
    prev_grapheme_boundary,
};

/// Text plus selection.
///
/// # Example
///
/// ```rust
/// use textpad_core::Document;
///
/// let mut doc = Document::new("hello");
/// doc.select_all();
/// doc.replace_selection("bye");
/// assert_eq!(doc.get_text(), "bye");
/// assert_eq!(doc.caret(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: Rope,
    anchor: usize,
    head: usize,
}

impl Document {
    /// Create a document with the caret at offset 0.
    pub fn new(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            anchor: 0,
            head: 0,
        }
    }

    /// The text.
    pub fn text(&self) -> &Rope {
        &self.text
    }

    /// The text as an owned `String`.
    pub fn get_text(&self) -> String {
        self.text.to_string()
    }

    /// Total chars.
    pub fn char_count(&self) -> usize {
        self.text.len_chars()
    }

    /// Total lines (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Selection start (char offset).
    pub fn selection_start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Selection end (exclusive char offset).
    pub fn selection_end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Selection length in chars.
    pub fn selection_length(&self) -> usize {
        self.selection_end() - self.selection_start()
    }

    /// Whether a non-empty range is selected.
    pub fn has_selection(&self) -> bool {
        self.anchor != self.head
    }

    /// The active end of the selection, where the caret is drawn.
    pub fn caret(&self) -> usize {
        self.head
    }

    /// Selected text (empty when nothing is selected).
    pub fn selected_text(&self) -> String {
        self.text
            .slice(self.selection_start()..self.selection_end())
            .to_string()
    }

    /// Caret `(line, column)`.
    pub fn caret_line_col(&self) -> (usize, usize) {
        offset_to_line_col(&self.text, self.head)
    }

    /// Caret cell x position within its line.
    pub fn caret_cell_x(&self) -> usize {
        let (line, column) = self.caret_line_col();
        cell_x(&self.text, line, column)
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> TextState {
        TextState::from_rope(
            self.selection_start(),
            self.selection_length(),
            self.text.clone(),
        )
    }

    /// Replace text and selection with `state`.
    ///
    /// The selection is clamped to the restored text; the caret lands at the selection end.
    pub fn restore(&mut self, state: &TextState) {
        self.text = state.text().clone();
        let len = self.text.len_chars();
        self.anchor = state.cursor_position().min(len);
        self.head = state.selection_end().min(len);
    }

    /// Select `length` chars starting at `start`.
    pub fn select(&mut self, start: usize, length: usize) -> Result<(), CommandError> {
        let end = start.saturating_add(length);
        if end > self.text.len_chars() {
            return Err(CommandError::InvalidRange { start, end });
        }
        self.anchor = start;
        self.head = end;
        Ok(())
    }

    /// Select the whole text.
    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.head = self.text.len_chars();
    }

    /// Replace the selection with `text` and put the caret after it.
    ///
    /// Returns whether the document text changed.
    pub fn replace_selection(&mut self, text: &str) -> bool {
        let start = self.selection_start();
        let end = self.selection_end();
        if start == end && text.is_empty() {
            return false;
        }

        let changed = self.text.slice(start..end) != text;
        self.text.remove(start..end);
        self.text.insert(start, text);
        let caret = start + text.chars().count();
        self.collapse_to(caret);
        changed
    }

    /// Replace the selection with `text` and leave the inserted text selected.
    ///
    /// Returns whether the document text changed.
    pub fn replace_and_select(&mut self, text: &str) -> bool {
        let start = self.selection_start();
        let changed = self.replace_selection(text);
        self.anchor = start;
        changed
    }

    /// Delete the selection, or the grapheme before the caret.
    pub fn backspace(&mut self) -> bool {
        if self.has_selection() {
            return self.replace_selection("");
        }
        let start = prev_grapheme_boundary(&self.text, self.head);
        self.delete_range(start, self.head)
    }

    /// Delete the selection, or the grapheme after the caret.
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.replace_selection("");
        }
        let end = next_grapheme_boundary(&self.text, self.head);
        self.delete_range(self.head, end)
    }

    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        self.text.remove(start..end);
        self.collapse_to(start);
        true
    }

    fn collapse_to(&mut self, offset: usize) {
        self.anchor = offset;
        self.head = offset;
    }

    fn move_head(&mut self, offset: usize, extend: bool) {
        self.head = offset;
        if !extend {
            self.anchor = offset;
        }
    }

    /// Move the caret one grapheme left. Without `extend`, a selection collapses to its start.
    pub fn move_left(&mut self, extend: bool) {
        if !extend && self.has_selection() {
            self.collapse_to(self.selection_start());
            return;
        }
        let target = prev_grapheme_boundary(&self.text, self.head);
        self.move_head(target, extend);
    }

    /// Move the caret one grapheme right. Without `extend`, a selection collapses to its end.
    pub fn move_right(&mut self, extend: bool) {
        if !extend && self.has_selection() {
            self.collapse_to(self.selection_end());
            return;
        }
        let target = next_grapheme_boundary(&self.text, self.head);
        self.move_head(target, extend);
    }

    /// Move the caret one line up, keeping the column where possible.
    pub fn move_up(&mut self, extend: bool) {
        let (line, column) = self.caret_line_col();
        let target = if line == 0 {
            0
        } else {
            line_col_to_offset(&self.text, line - 1, column)
        };
        self.move_head(target, extend);
    }

    /// Move the caret one line down, keeping the column where possible.
    pub fn move_down(&mut self, extend: bool) {
        let (line, column) = self.caret_line_col();
        let target = if line + 1 >= self.text.len_lines() {
            self.text.len_chars()
        } else {
            line_col_to_offset(&self.text, line + 1, column)
        };
        self.move_head(target, extend);
    }

    /// Move the caret to the start of its line.
    pub fn move_home(&mut self, extend: bool) {
        let (line, _) = self.caret_line_col();
        let target = self.text.line_to_char(line);
        self.move_head(target, extend);
    }

    /// Move the caret to the end of its line (before the line break).
    pub fn move_end(&mut self, extend: bool) {
        let (line, _) = self.caret_line_col();
        let target = self.text.line_to_char(line) + line_content_len(&self.text, line);
        self.move_head(target, extend);
    }
}
