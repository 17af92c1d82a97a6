//! Command Interface Layer
//!
//! Provides a unified command interface for convenient frontend integration.
//!
//! # Overview
//!
//! [`CommandExecutor`] owns one [`Document`] and its [`History`] and is the only thing that
//! mutates them. It supports the following types of operations:
//!
//! - **Text Editing**: typing, backspace, delete
//! - **Cursor Operations**: caret movement and selection
//! - **Transformations**: lowercase / uppercase / title case of the selection
//! - **History**: undo and redo
//!
//! Every change of the document text is reported to the history through
//! [`History::record_change`]; restores done by undo/redo go through the same path and are
//! de-duplicated there.
//!
//! # Example
//!
//! ```rust
//! use textpad_core::{Command, CommandExecutor, CursorCommand, EditCommand, HistoryCommand, TextTransform};
//!
//! let mut executor = CommandExecutor::empty();
//!
//! executor.execute(Command::Edit(EditCommand::InsertText { text: "abc".to_string() })).unwrap();
//! executor.execute(Command::Cursor(CursorCommand::SelectAll)).unwrap();
//! executor.execute(Command::Transform(TextTransform::Uppercase)).unwrap();
//! assert_eq!(executor.document().get_text(), "ABC");
//!
//! executor.execute(Command::History(HistoryCommand::Undo)).unwrap();
//! assert_eq!(executor.document().get_text(), "abc");
//! ```

use thiserror::Error;

use crate::document::Document;
use crate::history::{History, HistoryState};
use crate::snapshot::TextState;
use crate::transform::TextTransform;

/// Text editing commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Replace the selection with text (typing and pasting).
    InsertText {
        /// Text to insert.
        text: String,
    },
    /// Delete the selection or the grapheme before the caret.
    Backspace,
    /// Delete the selection or the grapheme after the caret.
    DeleteForward,
}

/// Cursor & selection commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorCommand {
    /// One grapheme left.
    Left {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// One grapheme right.
    Right {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// One line up.
    Up {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// One line down.
    Down {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// Start of line.
    Home {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// End of line.
    End {
        /// Extend the selection instead of moving the caret.
        extend: bool,
    },
    /// Select everything.
    SelectAll,
    /// Select an explicit range.
    Select {
        /// Start char offset.
        start: usize,
        /// Length in chars.
        length: usize,
    },
}

/// History commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommand {
    /// Restore the previous snapshot.
    Undo,
    /// Restore the snapshot undone last.
    Redo,
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text editing command
    Edit(EditCommand),
    /// Cursor command
    Cursor(CursorCommand),
    /// Case transformation of the selection
    Transform(TextTransform),
    /// History command
    History(HistoryCommand),
}

/// Command execution result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// The document text changed (the selection may have changed too).
    TextChanged,
    /// Only the selection or caret changed.
    SelectionChanged,
    /// Nothing changed: empty selection, text already in the target case, or nothing to
    /// undo/redo.
    Unchanged,
}

/// Command error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A selection range outside the document.
    #[error("Invalid range: {start}..{end}")]
    InvalidRange {
        /// Inclusive start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
    },
}

/// Command executor
///
/// `CommandExecutor` is the engine's mutation entry point, responsible for:
///
/// - Executing commands against the [`Document`]
/// - Recording a snapshot after every text change
/// - Capturing the pre-change selection for transformations so undo restores it
///
/// # Example
///
/// ```rust
/// use textpad_core::{Command, CommandExecutor, EditCommand, HistoryCommand};
///
/// let mut executor = CommandExecutor::new("");
/// executor.execute(Command::Edit(EditCommand::InsertText { text: "a".to_string() })).unwrap();
/// assert!(executor.can_undo());
///
/// executor.execute(Command::History(HistoryCommand::Undo)).unwrap();
/// assert_eq!(executor.document().get_text(), "");
/// assert!(executor.can_redo());
/// ```
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    document: Document,
    history: History,
}

impl CommandExecutor {
    /// Create an executor with unbounded history.
    pub fn new(text: &str) -> Self {
        let document = Document::new(text);
        let history = History::new(document.snapshot());
        Self { document, history }
    }

    /// Create an executor whose history keeps at most `limit` snapshots.
    pub fn with_history_limit(text: &str, limit: usize) -> Self {
        let document = Document::new(text);
        let history = History::with_limit(document.snapshot(), limit);
        Self { document, history }
    }

    /// Create an empty command executor
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Execute command
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        match command {
            Command::Edit(edit) => Ok(self.execute_edit(edit)),
            Command::Cursor(cursor) => self.execute_cursor(cursor),
            Command::Transform(transform) => Ok(self.execute_transform(transform)),
            Command::History(HistoryCommand::Undo) => Ok(self.execute_undo()),
            Command::History(HistoryCommand::Redo) => Ok(self.execute_redo()),
        }
    }

    /// Batch execute commands, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        commands: Vec<Command>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        commands
            .into_iter()
            .map(|command| self.execute(command))
            .collect()
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> TextState {
        self.document.snapshot()
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo stack depth
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Redo stack depth
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// History summary.
    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    fn text_changed(&mut self, pre: &TextState) {
        self.history.checkpoint(pre);
        self.history.record_change(self.document.snapshot());
    }

    fn execute_edit(&mut self, command: EditCommand) -> CommandResult {
        let pre = self.document.snapshot();
        let changed = match command {
            EditCommand::InsertText { text } => self.document.replace_selection(&text),
            EditCommand::Backspace => self.document.backspace(),
            EditCommand::DeleteForward => self.document.delete_forward(),
        };

        if changed {
            self.text_changed(&pre);
            CommandResult::TextChanged
        } else if self.document.snapshot() != pre {
            CommandResult::SelectionChanged
        } else {
            CommandResult::Unchanged
        }
    }

    fn execute_cursor(&mut self, command: CursorCommand) -> Result<CommandResult, CommandError> {
        let before = selection_bounds(&self.document);

        match command {
            CursorCommand::Left { extend } => self.document.move_left(extend),
            CursorCommand::Right { extend } => self.document.move_right(extend),
            CursorCommand::Up { extend } => self.document.move_up(extend),
            CursorCommand::Down { extend } => self.document.move_down(extend),
            CursorCommand::Home { extend } => self.document.move_home(extend),
            CursorCommand::End { extend } => self.document.move_end(extend),
            CursorCommand::SelectAll => self.document.select_all(),
            CursorCommand::Select { start, length } => self.document.select(start, length)?,
        }

        if selection_bounds(&self.document) == before {
            Ok(CommandResult::Unchanged)
        } else {
            Ok(CommandResult::SelectionChanged)
        }
    }

    fn execute_transform(&mut self, transform: TextTransform) -> CommandResult {
        let selected = self.document.selected_text();
        if transform.is_noop(&selected) {
            log::debug!("{transform}: selection already formatted, skipping");
            return CommandResult::Unchanged;
        }

        let pre = self.document.snapshot();
        // The result may differ in length ("ß" -> "SS").
        self.document.replace_and_select(&transform.apply(&selected));

        self.text_changed(&pre);
        CommandResult::TextChanged
    }

    fn restore(&mut self, state: Option<TextState>) -> CommandResult {
        let Some(state) = state else {
            return CommandResult::Unchanged;
        };
        self.document.restore(&state);
        // De-duplicated: the text equals the current entry.
        self.history.record_change(self.document.snapshot());
        CommandResult::TextChanged
    }

    fn execute_undo(&mut self) -> CommandResult {
        let state = self.history.undo();
        self.restore(state)
    }

    fn execute_redo(&mut self) -> CommandResult {
        let state = self.history.redo();
        self.restore(state)
    }
}

fn selection_bounds(document: &Document) -> (usize, usize, usize) {
    (
        document.selection_start(),
        document.selection_end(),
        document.caret(),
    )
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::empty()
    }
}
