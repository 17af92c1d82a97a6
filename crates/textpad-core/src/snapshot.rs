//! Text snapshots
//!
//! A [`TextState`] captures everything needed to put the text box back into an earlier state:
//! the full text, where the selection starts, and how long it is. Snapshots are immutable and
//! cheap to clone, because the text is held as a [`Rope`] whose clones share structure.

use ropey::Rope;

/// Immutable snapshot of the text, the cursor offset and the selection length.
///
/// Offsets are counted in chars (Unicode scalar values). The cursor is the start of the
/// selection; an empty selection is a plain caret.
///
/// # Example
///
/// ```rust
/// use textpad_core::TextState;
///
/// let state = TextState::new(1, 3, "Hello");
/// assert_eq!(state.full_text(), "Hello");
/// assert_eq!(state.selection_end(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextState {
    cursor_position: usize,
    selection_length: usize,
    text: Rope,
}

impl TextState {
    /// Create a snapshot from plain text.
    pub fn new(cursor_position: usize, selection_length: usize, text: &str) -> Self {
        Self::from_rope(cursor_position, selection_length, Rope::from_str(text))
    }

    /// Create a snapshot that shares an existing rope.
    pub fn from_rope(cursor_position: usize, selection_length: usize, text: Rope) -> Self {
        Self {
            cursor_position,
            selection_length,
            text,
        }
    }

    /// The empty text with the caret at offset 0.
    pub fn empty() -> Self {
        Self::from_rope(0, 0, Rope::new())
    }

    /// Selection start (char offset).
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Selection length in chars.
    pub fn selection_length(&self) -> usize {
        self.selection_length
    }

    /// Exclusive selection end (char offset).
    pub fn selection_end(&self) -> usize {
        self.cursor_position + self.selection_length
    }

    /// The snapshot text.
    pub fn text(&self) -> &Rope {
        &self.text
    }

    /// The snapshot text as an owned `String`.
    pub fn full_text(&self) -> String {
        self.text.to_string()
    }

    /// Whether `other` holds the same text, regardless of selection.
    pub fn same_text(&self, other: &TextState) -> bool {
        self.text == other.text
    }

    /// Same text with a different selection.
    pub fn with_selection(&self, cursor_position: usize, selection_length: usize) -> Self {
        Self::from_rope(cursor_position, selection_length, self.text.clone())
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self::empty()
    }
}
