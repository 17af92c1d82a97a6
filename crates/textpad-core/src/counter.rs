//! Live character count.

use std::fmt;
use std::str::FromStr;

use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

/// Unit used to measure the text length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountMode {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// Extended grapheme clusters (what a reader perceives as characters).
    Graphemes,
    /// UTF-16 code units.
    Utf16,
}

impl CountMode {
    /// Config-file name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            CountMode::Chars => "chars",
            CountMode::Graphemes => "graphemes",
            CountMode::Utf16 => "utf16",
        }
    }
}

impl fmt::Display for CountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown [`CountMode`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown count mode `{0}` (expected chars, graphemes or utf16)")]
pub struct CountModeParseError(pub String);

impl FromStr for CountMode {
    type Err = CountModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "chars" => Ok(CountMode::Chars),
            "graphemes" => Ok(CountMode::Graphemes),
            "utf16" => Ok(CountMode::Utf16),
            other => Err(CountModeParseError(other.to_string())),
        }
    }
}

/// Length of `text` in `mode` units.
pub fn count(text: &Rope, mode: CountMode) -> usize {
    match mode {
        CountMode::Chars => text.len_chars(),
        CountMode::Utf16 => text.len_utf16_cu(),
        CountMode::Graphemes => text.to_string().graphemes(true).count(),
    }
}

/// Cached count, refreshed on every text change.
#[derive(Debug, Clone, Default)]
pub struct CharCounter {
    mode: CountMode,
    count: usize,
}

impl CharCounter {
    /// Create a counter for `text`.
    pub fn new(text: &Rope, mode: CountMode) -> Self {
        Self {
            mode,
            count: count(text, mode),
        }
    }

    /// Recount after a text change.
    pub fn update(&mut self, text: &Rope) {
        self.count = count(text, self.mode);
    }

    /// Switch unit and recount.
    pub fn set_mode(&mut self, mode: CountMode, text: &Rope) {
        self.mode = mode;
        self.update(text);
    }

    /// Current unit.
    pub fn mode(&self) -> CountMode {
        self.mode
    }

    /// Current count.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The count as displayed in the label.
    pub fn label(&self) -> String {
        self.count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_modes_differ_on_emoji() {
        // Thumbs up + skin tone modifier: 2 scalars, 1 grapheme, 4 UTF-16 units.
        let text = Rope::from_str("a\u{1F44D}\u{1F3FD}");
        assert_eq!(count(&text, CountMode::Chars), 3);
        assert_eq!(count(&text, CountMode::Graphemes), 2);
        assert_eq!(count(&text, CountMode::Utf16), 5);
    }

    #[test]
    fn test_empty_text_counts_zero() {
        let counter = CharCounter::new(&Rope::new(), CountMode::Graphemes);
        assert_eq!(counter.label(), "0");
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("utf16".parse::<CountMode>(), Ok(CountMode::Utf16));
        assert!("bytes".parse::<CountMode>().is_err());
    }
}
