#![warn(missing_docs)]
//! TextPad Core - Headless Text Pad Engine
//!
//! # Overview
//!
//! `textpad-core` is the engine behind a single-window text pad that shows a live character
//! count and supports case-transformation shortcuts plus snapshot-based undo/redo.
//! It does not render anything; a frontend feeds it normalised key events and draws from its
//! state queries.
//!
//! # Core Features
//!
//! - **Snapshot History**: linear undo/redo over whole-text snapshots, rope-backed so a snapshot
//!   shares structure with the live text
//! - **Shortcut Dispatch**: an explicit key combination → command table, configurable at runtime
//! - **Case Transforms**: lowercase / uppercase / title case of the selection, Unicode-aware
//! - **Live Count**: chars, grapheme clusters or UTF-16 units
//! - **Headless Layout**: fixed-offset window layout and scroll-to-caret
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  State Manager & Key Dispatch               │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Command Executor                           │  ← Mutation entry point
//! ├─────────────────────────────────────────────┤
//! │  Document (text box)  │  History            │  ← Text + snapshots
//! ├─────────────────────────────────────────────┤
//! │  Rope storage (ropey)                       │  ← Text storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use textpad_core::{EditorStateManager, Key, KeyCombo, Modifiers};
//!
//! let mut manager = EditorStateManager::new("");
//! for c in "abc".chars() {
//!     manager.handle_key(KeyCombo::plain(Key::Char(c))).unwrap();
//! }
//!
//! let ctrl = Modifiers::CONTROL;
//! let ctrl_shift = Modifiers::CONTROL | Modifiers::SHIFT;
//! manager.handle_key(KeyCombo::new(Key::Char('a'), ctrl)).unwrap();       // select all
//! manager.handle_key(KeyCombo::new(Key::Char('u'), ctrl_shift)).unwrap(); // uppercase
//! assert_eq!(manager.document().get_text(), "ABC");
//!
//! manager.handle_key(KeyCombo::new(Key::Char('z'), ctrl)).unwrap();       // undo
//! assert_eq!(manager.document().get_text(), "abc");
//! assert_eq!(manager.count_label(), "3");
//! ```
//!
//! # Module Description
//!
//! - [`snapshot`] - `TextState` snapshots
//! - [`history`] - linear snapshot history
//! - [`document`] - text box model and default editing behaviour
//! - [`transform`] - case transformations
//! - [`keymap`] - key normalisation and the shortcut table
//! - [`commands`] - unified command interface
//! - [`counter`] - character counting
//! - [`layout`] - window layout and scrolling
//! - [`state`] - state management and query interface

pub mod commands;
pub mod counter;
pub mod document;
pub mod history;
pub mod keymap;
pub mod layout;
pub mod snapshot;
pub mod state;
pub mod text;
pub mod transform;

pub use commands::{
    Command, CommandError, CommandExecutor, CommandResult, CursorCommand, EditCommand,
    HistoryCommand,
};
pub use counter::{CharCounter, CountMode, CountModeParseError};
pub use document::Document;
pub use history::{History, HistoryState};
pub use keymap::{EditorCommand, Key, KeyCombo, KeyParseError, Keymap, Modifiers};
pub use layout::{FormLayout, Rect, ScrollState};
pub use snapshot::TextState;
pub use state::{
    CursorState, DocumentState, EditorOptions, EditorStateManager, KeyOutcome, StateChange,
    StateChangeCallback, StateChangeType,
};
pub use transform::TextTransform;
