//! Snapshot History
//!
//! Linear undo/redo history over whole-text [`TextState`] snapshots.
//!
//! Every text mutation records the resulting state, so the entry under the history cursor is
//! always "what is on screen". Undo moves the cursor one entry back and returns that entry for
//! restoration; redo moves it forward again. Entry 0 is the base state the session started
//! from.
//!
//! ```text
//!   base    "a"    "ab"   "abc"
//!  [  0  ] [ 1 ] [  2 ] [  3  ]
//!                  ^ cursor after one undo; entry 3 is the redo region
//! ```
//!
//! Recording a new state while entries exist after the cursor discards them: history never
//! branches.

use crate::snapshot::TextState;

/// Undo/redo depth summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryState {
    /// Whether [`History::undo`] would restore something.
    pub can_undo: bool,
    /// Whether [`History::redo`] would restore something.
    pub can_redo: bool,
    /// Entries before the cursor.
    pub undo_depth: usize,
    /// Entries after the cursor.
    pub redo_depth: usize,
}

/// Linear snapshot history with a cursor.
///
/// # Example
///
/// ```rust
/// use textpad_core::{History, TextState};
///
/// let mut history = History::new(TextState::empty());
/// history.record_change(TextState::new(1, 0, "a"));
/// history.record_change(TextState::new(2, 0, "ab"));
///
/// assert_eq!(history.undo().unwrap().full_text(), "a");
/// assert_eq!(history.redo().unwrap().full_text(), "ab");
/// ```
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<TextState>,
    cursor: usize,
    /// Maximum number of entries kept (including the base); `None` is unbounded.
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded history rooted at `base`.
    pub fn new(base: TextState) -> Self {
        Self {
            entries: vec![base],
            cursor: 0,
            limit: None,
        }
    }

    /// Create a history that keeps at most `limit` entries, dropping the oldest first.
    ///
    /// A limit below 1 is treated as 1 (only the current state is kept).
    pub fn with_limit(base: TextState, limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new(base)
        }
    }

    /// The entry under the cursor.
    pub fn current(&self) -> &TextState {
        &self.entries[self.cursor]
    }

    /// Record the state produced by a text change.
    ///
    /// Returns `false` (and records nothing) when the text equals the current entry's text,
    /// so redundant change events are harmless. Any redo entries are discarded.
    pub fn record_change(&mut self, state: TextState) -> bool {
        if self.current().same_text(&state) {
            return false;
        }

        let discarded = self.entries.len() - self.cursor - 1;
        if discarded > 0 {
            log::debug!("history: fresh edit discards {discarded} redo entries");
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        self.cursor += 1;

        if let Some(limit) = self.limit
            && self.entries.len() > limit
        {
            let excess = self.entries.len() - limit;
            self.entries.drain(..excess);
            self.cursor -= excess;
        }

        log::trace!("history: recorded entry {}", self.cursor);
        true
    }

    /// Store the selection the user had right before a mutation.
    ///
    /// `pre` must describe the text currently under the cursor; otherwise nothing happens.
    /// Undoing the mutation then restores this selection instead of the one recorded when the
    /// text last changed.
    pub fn checkpoint(&mut self, pre: &TextState) {
        let cursor = self.cursor;
        let current = &mut self.entries[cursor];
        if current.same_text(pre) {
            *current = pre.clone();
        }
    }

    /// Step back one entry and return the state to restore, or `None` at the base.
    pub fn undo(&mut self) -> Option<TextState> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!(
            "history: undo to entry {} ({} redo)",
            self.cursor,
            self.redo_depth()
        );
        Some(self.current().clone())
    }

    /// Step forward one entry and return the state to restore, or `None` when nothing was
    /// undone.
    pub fn redo(&mut self) -> Option<TextState> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("history: redo to entry {}", self.cursor);
        Some(self.current().clone())
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of entries before the cursor.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of entries after the cursor.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }

    /// Total number of entries, including the base.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the history holds at least its base entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured entry limit.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Drop everything and start over from `base`.
    pub fn clear(&mut self, base: TextState) {
        self.entries.clear();
        self.entries.push(base);
        self.cursor = 0;
    }

    /// Summary for state queries.
    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_depth: self.undo_depth(),
            redo_depth: self.redo_depth(),
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(TextState::empty())
    }
}
