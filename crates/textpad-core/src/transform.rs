//! Case transformations applied to the selection.

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

/// Lowercase `text` (Unicode-aware).
pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Uppercase `text` (Unicode-aware).
pub fn uppercase(text: &str) -> String {
    text.to_uppercase()
}

/// Title-case every word of `text`.
///
/// Words follow UAX #29 word boundaries, so `"don't"` stays one word. The first character of
/// each word is upper-cased and the rest lower-cased. Words that are already entirely
/// uppercase are treated as acronyms and left untouched; lower the text first (see
/// [`TextTransform::TitleCase`]) to title-case them too.
///
/// ```rust
/// use textpad_core::transform::title_case;
///
/// assert_eq!(title_case("hello wORLD"), "Hello World");
/// assert_eq!(title_case("the NASA report"), "The NASA Report");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_word_bounds() {
        if is_acronym(word) {
            out.push_str(word);
            continue;
        }

        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

fn is_acronym(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

/// A case transformation bound to a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTransform {
    /// Lowercase the selection.
    Lowercase,
    /// Uppercase the selection.
    Uppercase,
    /// Lowercase, then title-case the selection.
    TitleCase,
}

impl TextTransform {
    /// Apply the transformation.
    pub fn apply(self, text: &str) -> String {
        match self {
            TextTransform::Lowercase => lowercase(text),
            TextTransform::Uppercase => uppercase(text),
            TextTransform::TitleCase => title_case(&lowercase(text)),
        }
    }

    /// Whether applying would leave `text` unchanged (always true for empty text).
    pub fn is_noop(self, text: &str) -> bool {
        text.is_empty() || self.apply(text) == text
    }

    /// Short name shown in status messages.
    pub fn name(self) -> &'static str {
        match self {
            TextTransform::Lowercase => "lowercase",
            TextTransform::Uppercase => "uppercase",
            TextTransform::TitleCase => "title_case",
        }
    }
}

impl fmt::Display for TextTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_after_lowering_all_caps() {
        assert_eq!(TextTransform::TitleCase.apply("HELLO wORLD"), "Hello World");
    }

    #[test]
    fn test_title_case_keeps_apostrophes_inside_words() {
        assert_eq!(title_case("don't stop"), "Don't Stop");
    }

    #[test]
    fn test_title_case_preserves_separators() {
        assert_eq!(title_case("a-b  c\td\n"), "A-B  C\tD\n");
    }

    #[test]
    fn test_is_noop_for_target_case() {
        assert!(TextTransform::Lowercase.is_noop("abc 123"));
        assert!(TextTransform::Uppercase.is_noop("ABC 123"));
        assert!(!TextTransform::Uppercase.is_noop("aBC"));
        assert!(TextTransform::TitleCase.is_noop(""));
    }

    #[test]
    fn test_uppercase_can_grow_text() {
        assert_eq!(uppercase("straße"), "STRASSE");
    }
}
