//! Editor State Interface
//!
//! Provides the state query interface a frontend renders from, plus key dispatch.
//!
//! # Overview
//!
//! [`EditorStateManager`] is the session object: it owns the [`CommandExecutor`] (document and
//! history), the shortcut [`Keymap`], the character counter and the scroll state. Nothing is
//! global, so any number of sessions can coexist. It supports:
//!
//! - **Key Dispatch**: shortcut table first, default text-box handling second
//! - **State Queries**: document, cursor, history and scroll state
//! - **Version Tracking**: the version increments on every observable change
//! - **Change Notifications**: subscribe to [`StateChange`] events
//!
//! # Example
//!
//! ```rust
//! use textpad_core::{EditorStateManager, Key, KeyCombo, Modifiers};
//!
//! let mut manager = EditorStateManager::new("");
//! for c in "Hello".chars() {
//!     manager.handle_key(KeyCombo::plain(Key::Char(c))).unwrap();
//! }
//! assert_eq!(manager.count_label(), "5");
//!
//! manager.handle_key(KeyCombo::new(Key::Char('z'), Modifiers::CONTROL)).unwrap();
//! assert_eq!(manager.document().get_text(), "Hell");
//! ```

use ropey::Rope;

use crate::commands::{Command, CommandError, CommandExecutor, CommandResult, EditCommand};
use crate::counter::{CharCounter, CountMode};
use crate::document::Document;
use crate::history::HistoryState;
use crate::keymap::{EditorCommand, KeyCombo, Keymap, text_box_command};
use crate::layout::ScrollState;

/// Document state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    /// Length in the configured [`CountMode`] (what the counter shows).
    pub char_count: usize,
    /// Total document line count
    pub line_count: usize,
    /// Total document byte count
    pub byte_count: usize,
    /// Whether the text differs from the text the session started with
    pub is_modified: bool,
    /// State version number (incremented after each observable change)
    pub version: u64,
}

/// Cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    /// Caret line (0-based)
    pub line: usize,
    /// Caret column in chars (0-based)
    pub column: usize,
    /// Selection start (char offset)
    pub selection_start: usize,
    /// Selection length in chars
    pub selection_length: usize,
}

/// State change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeType {
    /// Document content modified
    DocumentModified,
    /// Selection or caret changed
    SelectionChanged,
    /// Viewport size or scroll offsets changed
    ViewportChanged,
}

/// State change record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A shortcut from the table ran.
    Shortcut {
        /// The bound command.
        command: EditorCommand,
        /// Its effect.
        result: CommandResult,
    },
    /// The quit shortcut; the frontend closes the window.
    Quit,
    /// Default text-box handling ran.
    Edited(CommandResult),
    /// The key has no meaning here.
    Ignored,
}

/// Construction options for [`EditorStateManager`].
#[derive(Debug, Clone, Default)]
pub struct EditorOptions {
    /// Unit of the character count.
    pub count_mode: CountMode,
    /// Maximum snapshots kept; `None` is unbounded.
    pub history_limit: Option<usize>,
    /// Shortcut table.
    pub keymap: Keymap,
}

/// Editor state manager
///
/// Wraps the [`CommandExecutor`] and keeps everything derived from it current: the character
/// count is refreshed on every text change, the view scrolls to keep the caret visible after
/// every change, and subscribers are notified.
pub struct EditorStateManager {
    executor: CommandExecutor,
    keymap: Keymap,
    counter: CharCounter,
    state_version: u64,
    initial_text: Rope,
    callbacks: Vec<StateChangeCallback>,
    scroll: ScrollState,
    viewport: (usize, usize),
}

impl EditorStateManager {
    /// Create a state manager with default options.
    pub fn new(text: &str) -> Self {
        Self::with_options(text, EditorOptions::default())
    }

    /// Create a state manager.
    pub fn with_options(text: &str, options: EditorOptions) -> Self {
        let executor = match options.history_limit {
            Some(limit) => CommandExecutor::with_history_limit(text, limit),
            None => CommandExecutor::new(text),
        };
        let counter = CharCounter::new(executor.document().text(), options.count_mode);
        let initial_text = executor.document().text().clone();
        Self {
            executor,
            keymap: options.keymap,
            counter,
            state_version: 0,
            initial_text,
            callbacks: Vec::new(),
            scroll: ScrollState::default(),
            viewport: (0, 0),
        }
    }

    /// The document.
    pub fn document(&self) -> &Document {
        self.executor.document()
    }

    /// The command executor.
    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    /// The shortcut table.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Replace the shortcut table.
    pub fn set_keymap(&mut self, keymap: Keymap) {
        self.keymap = keymap;
    }

    /// Execute a command and trigger state change notifications.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        let result = self.executor.execute(command)?;
        match result {
            CommandResult::TextChanged => {
                self.counter.update(self.executor.document().text());
                self.scroll_to_caret();
                self.mark_changed(StateChangeType::DocumentModified);
            }
            CommandResult::SelectionChanged => {
                self.scroll_to_caret();
                self.mark_changed(StateChangeType::SelectionChanged);
            }
            CommandResult::Unchanged => {}
        }
        Ok(result)
    }

    /// Dispatch a key press: the shortcut table first, then default text-box handling.
    pub fn handle_key(&mut self, combo: KeyCombo) -> Result<KeyOutcome, CommandError> {
        if let Some(command) = self.keymap.lookup(&combo) {
            log::debug!("{combo} -> {command}");
            let Some(engine_command) = command.to_command() else {
                return Ok(KeyOutcome::Quit);
            };
            let result = self.execute(engine_command)?;
            return Ok(KeyOutcome::Shortcut { command, result });
        }

        match text_box_command(&combo) {
            Some(command) => Ok(KeyOutcome::Edited(self.execute(command)?)),
            None => Ok(KeyOutcome::Ignored),
        }
    }

    /// Insert pasted text as a single edit.
    pub fn paste(&mut self, text: &str) -> Result<CommandResult, CommandError> {
        self.execute(Command::Edit(EditCommand::InsertText {
            text: text.to_string(),
        }))
    }

    /// Subscribe to state changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Current version number.
    pub fn version(&self) -> u64 {
        self.state_version
    }

    /// Whether the text differs from the seed text; undoing back to it clears the flag.
    pub fn is_modified(&self) -> bool {
        *self.executor.document().text() != self.initial_text
    }

    /// Current character count.
    pub fn char_count(&self) -> usize {
        self.counter.count()
    }

    /// The character count as displayed.
    pub fn count_label(&self) -> String {
        self.counter.label()
    }

    /// Unit of the character count.
    pub fn count_mode(&self) -> CountMode {
        self.counter.mode()
    }

    /// Switch the unit of the character count.
    pub fn set_count_mode(&mut self, mode: CountMode) {
        self.counter.set_mode(mode, self.executor.document().text());
    }

    /// Document state
    pub fn get_document_state(&self) -> DocumentState {
        let text = self.executor.document().text();
        DocumentState {
            char_count: self.counter.count(),
            line_count: text.len_lines(),
            byte_count: text.len_bytes(),
            is_modified: self.is_modified(),
            version: self.state_version,
        }
    }

    /// Cursor state
    pub fn get_cursor_state(&self) -> CursorState {
        let document = self.executor.document();
        let (line, column) = document.caret_line_col();
        CursorState {
            line,
            column,
            selection_start: document.selection_start(),
            selection_length: document.selection_length(),
        }
    }

    /// Undo/redo state
    pub fn get_history_state(&self) -> HistoryState {
        self.executor.history_state()
    }

    /// Scroll offsets of the text viewport.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    /// Viewport size in cells, as `(width, height)`.
    pub fn viewport(&self) -> (usize, usize) {
        self.viewport
    }

    /// Set the viewport size (after a resize) and keep the caret visible.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        if self.viewport == (width, height) {
            return;
        }
        self.viewport = (width, height);
        self.scroll_to_caret();
        self.mark_changed(StateChangeType::ViewportChanged);
    }

    fn scroll_to_caret(&mut self) {
        let document = self.executor.document();
        let (line, _) = document.caret_line_col();
        let x = document.caret_cell_x();
        let (width, height) = self.viewport;
        if self.scroll.ensure_visible(line, x, width, height) {
            log::trace!("scrolled to {:?}", self.scroll);
        }
    }

    fn mark_changed(&mut self, change_type: StateChangeType) {
        let old_version = self.state_version;
        self.state_version += 1;
        let change = StateChange {
            change_type,
            old_version,
            new_version: self.state_version,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
