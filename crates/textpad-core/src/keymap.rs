//! Shortcut dispatch table
//!
//! Key events are normalised into [`KeyCombo`]s and looked up in a [`Keymap`], an explicit
//! table from key combination to [`EditorCommand`]. Anything the table does not claim falls
//! through to [`text_box_command`], the default text-box behaviour.
//!
//! # Shift normalisation
//!
//! Terminals with an enhanced keyboard protocol disagree on how they report `Ctrl+Shift+L`:
//! some send `'L'`, others `'l'` with the Shift flag. [`KeyCombo::new`] folds both into
//! `'l'` + Shift. For symbols the shifted character already encodes Shift (`'?'` rather than
//! `Shift+'/'`), so the flag is dropped.
//!
//! Legacy terminals send the same control byte for `Ctrl+Shift+L` and `Ctrl+L`, so Shift is
//! lost before it reaches the table. [`Keymap::bind_legacy_fallbacks`] adds bindings that
//! survive that encoding.
//!
//! ```rust
//! use textpad_core::{Key, KeyCombo, Modifiers};
//!
//! let reported = KeyCombo::new(Key::Char('L'), Modifiers::CONTROL);
//! let parsed: KeyCombo = "ctrl+shift+l".parse().unwrap();
//! assert_eq!(reported, parsed);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

use crate::commands::{Command, CursorCommand, EditCommand, HistoryCommand};
use crate::transform::TextTransform;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift
        const SHIFT = 0b0001;
        /// Control
        const CONTROL = 0b0010;
        /// Alt / Option
        const ALT = 0b0100;
        /// Super / Command / Windows
        const SUPER = 0b1000;
    }
}

/// A physical or character key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key (after Shift normalisation, ASCII letters are lowercase).
    Char(char),
    /// Enter / Return
    Enter,
    /// Tab
    Tab,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home
    Home,
    /// End
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Escape
    Esc,
    /// Function key `F1`..`F24`
    F(u8),
}

/// A normalised key + modifier combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key.
    pub key: Key,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a combination, normalising Shift for character keys.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        let (key, modifiers) = match key {
            Key::Char(c) if c.is_ascii_alphabetic() => {
                let modifiers = if c.is_ascii_uppercase() {
                    modifiers | Modifiers::SHIFT
                } else {
                    modifiers
                };
                (Key::Char(c.to_ascii_lowercase()), modifiers)
            }
            Key::Char(c) => (Key::Char(c), modifiers - Modifiers::SHIFT),
            other => (other, modifiers),
        };
        Self { key, modifiers }
    }

    /// A key with no modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::empty())
    }

    /// The character this combination types into the text box, if any.
    ///
    /// Control/Alt/Super combinations never type.
    pub fn typed_char(&self) -> Option<char> {
        if self
            .modifiers
            .intersects(Modifiers::CONTROL | Modifiers::ALT | Modifiers::SUPER)
        {
            return None;
        }
        match self.key {
            Key::Char(c) if self.modifiers.contains(Modifiers::SHIFT) => {
                Some(c.to_ascii_uppercase())
            }
            Key::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CONTROL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SUPER, "Super"),
            (Modifiers::SHIFT, "Shift"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.key {
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Failure to parse a key string such as `"ctrl+shift+l"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    /// The string was empty.
    #[error("key binding is empty")]
    Empty,
    /// The key part was not recognised.
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    /// A modifier part was not recognised.
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    /// The command name was not recognised.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

fn parse_key(name: &str) -> Result<Key, KeyParseError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Key::Char(c));
    }

    let lower = name.to_ascii_lowercase();
    let key = match lower.as_str() {
        "enter" | "return" => Key::Enter,
        "tab" => Key::Tab,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "esc" | "escape" => Key::Esc,
        "space" => Key::Char(' '),
        "plus" => Key::Char('+'),
        _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=24) => Key::F(n),
            _ => return Err(KeyParseError::UnknownKey(name.to_string())),
        },
    };
    Ok(key)
}

fn parse_modifier(name: &str) -> Result<Modifiers, KeyParseError> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(Modifiers::CONTROL),
        "shift" => Ok(Modifiers::SHIFT),
        "alt" | "option" => Ok(Modifiers::ALT),
        "super" | "cmd" | "meta" | "win" => Ok(Modifiers::SUPER),
        _ => Err(KeyParseError::UnknownModifier(name.to_string())),
    }
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let (modifier_part, key_part) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            s.rsplit_once('+').unwrap_or(("", s))
        };

        let key = parse_key(key_part.trim())?;
        let mut modifiers = Modifiers::empty();
        for part in modifier_part.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            modifiers |= parse_modifier(part)?;
        }

        Ok(KeyCombo::new(key, modifiers))
    }
}

/// A command reachable through the shortcut table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    /// Lowercase the selection.
    Lowercase,
    /// Uppercase the selection.
    Uppercase,
    /// Title-case the selection.
    TitleCase,
    /// Undo
    Undo,
    /// Redo
    Redo,
    /// Close the window.
    Quit,
}

impl EditorCommand {
    /// All commands, in help-line order.
    pub const ALL: [EditorCommand; 6] = [
        EditorCommand::Lowercase,
        EditorCommand::Uppercase,
        EditorCommand::TitleCase,
        EditorCommand::Undo,
        EditorCommand::Redo,
        EditorCommand::Quit,
    ];

    /// Config-file name of the command.
    pub fn name(self) -> &'static str {
        match self {
            EditorCommand::Lowercase => "lowercase",
            EditorCommand::Uppercase => "uppercase",
            EditorCommand::TitleCase => "title_case",
            EditorCommand::Undo => "undo",
            EditorCommand::Redo => "redo",
            EditorCommand::Quit => "quit",
        }
    }

    /// The engine command this shortcut runs; `None` for commands handled by the frontend.
    pub fn to_command(self) -> Option<Command> {
        match self {
            EditorCommand::Lowercase => Some(Command::Transform(TextTransform::Lowercase)),
            EditorCommand::Uppercase => Some(Command::Transform(TextTransform::Uppercase)),
            EditorCommand::TitleCase => Some(Command::Transform(TextTransform::TitleCase)),
            EditorCommand::Undo => Some(Command::History(HistoryCommand::Undo)),
            EditorCommand::Redo => Some(Command::History(HistoryCommand::Redo)),
            EditorCommand::Quit => None,
        }
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditorCommand {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorCommand::ALL
            .into_iter()
            .find(|cmd| cmd.name() == s.trim())
            .ok_or_else(|| KeyParseError::UnknownCommand(s.to_string()))
    }
}

/// Key combination → command table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<KeyCombo, EditorCommand>,
}

impl Keymap {
    /// A table with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `combo` to `command`, returning the command it replaced.
    pub fn bind(&mut self, combo: KeyCombo, command: EditorCommand) -> Option<EditorCommand> {
        self.bindings.insert(combo, command)
    }

    /// Parse `key` and bind it to `command`. `"none"` unbinds the key instead.
    pub fn bind_str(&mut self, key: &str, command: &str) -> Result<(), KeyParseError> {
        let combo: KeyCombo = key.parse()?;
        if command.trim() == "none" {
            self.unbind(&combo);
            return Ok(());
        }
        self.bind(combo, command.parse()?);
        Ok(())
    }

    /// Remove a binding.
    pub fn unbind(&mut self, combo: &KeyCombo) -> Option<EditorCommand> {
        self.bindings.remove(combo)
    }

    /// Add bindings usable when Ctrl+Shift+letter arrives as Ctrl+letter.
    ///
    /// Binds Alt+L, Alt+U and Alt+T to the case commands and Ctrl+Y to redo. Combinations
    /// that are already bound keep their command.
    pub fn bind_legacy_fallbacks(&mut self) {
        for (c, command) in [
            ('l', EditorCommand::Lowercase),
            ('u', EditorCommand::Uppercase),
            ('t', EditorCommand::TitleCase),
        ] {
            self.bindings
                .entry(KeyCombo::new(Key::Char(c), Modifiers::ALT))
                .or_insert(command);
        }
        self.bindings
            .entry(KeyCombo::new(Key::Char('y'), Modifiers::CONTROL))
            .or_insert(EditorCommand::Redo);
    }

    /// Look up the command bound to `combo`.
    pub fn lookup(&self, combo: &KeyCombo) -> Option<EditorCommand> {
        self.bindings.get(combo).copied()
    }

    /// All combinations bound to `command`, sorted by their display form.
    pub fn bindings_for(&self, command: EditorCommand) -> Vec<KeyCombo> {
        let mut combos: Vec<KeyCombo> = self
            .bindings
            .iter()
            .filter(|(_, cmd)| **cmd == command)
            .map(|(combo, _)| *combo)
            .collect();
        combos.sort_by_cached_key(|combo| combo.to_string());
        combos
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let ctrl = Modifiers::CONTROL;
        let ctrl_shift = Modifiers::CONTROL | Modifiers::SHIFT;

        let mut keymap = Self::empty();
        for (key, modifiers, command) in [
            (Key::Char('l'), ctrl_shift, EditorCommand::Lowercase),
            (Key::Char('u'), ctrl_shift, EditorCommand::Uppercase),
            (Key::Char('t'), ctrl_shift, EditorCommand::TitleCase),
            (Key::Char('?'), ctrl_shift, EditorCommand::TitleCase),
            (Key::Char('z'), ctrl, EditorCommand::Undo),
            (Key::Char('z'), ctrl_shift, EditorCommand::Redo),
            (Key::Char('y'), ctrl, EditorCommand::Redo),
            (Key::Char('q'), ctrl, EditorCommand::Quit),
        ] {
            keymap.bind(KeyCombo::new(key, modifiers), command);
        }
        keymap
    }
}

/// Default text-box behaviour for keys the shortcut table does not claim.
pub fn text_box_command(combo: &KeyCombo) -> Option<Command> {
    if let Some(c) = combo.typed_char() {
        return Some(Command::Edit(EditCommand::InsertText {
            text: c.to_string(),
        }));
    }

    let extend = combo.modifiers.contains(Modifiers::SHIFT);
    let ctrl = combo.modifiers.contains(Modifiers::CONTROL);
    let command = match combo.key {
        Key::Char('a') if ctrl => Command::Cursor(CursorCommand::SelectAll),
        Key::Enter => Command::Edit(EditCommand::InsertText {
            text: "\n".to_string(),
        }),
        Key::Tab => Command::Edit(EditCommand::InsertText {
            text: "\t".to_string(),
        }),
        Key::Backspace => Command::Edit(EditCommand::Backspace),
        Key::Delete => Command::Edit(EditCommand::DeleteForward),
        Key::Left => Command::Cursor(CursorCommand::Left { extend }),
        Key::Right => Command::Cursor(CursorCommand::Right { extend }),
        Key::Up => Command::Cursor(CursorCommand::Up { extend }),
        Key::Down => Command::Cursor(CursorCommand::Down { extend }),
        Key::Home => Command::Cursor(CursorCommand::Home { extend }),
        Key::End => Command::Cursor(CursorCommand::End { extend }),
        _ => return None,
    };
    Some(command)
}
