//! Delimiter-based tokenizer.
//!
//! Splitting is a literal split on the delimiter (not a regular expression,
//! not word segmentation). Each piece is trimmed, empty pieces are dropped and
//! the configured case is forced.

use serde::{Deserialize, Serialize};

use crate::query::options::CaseMode;

/// Splits text into trimmed, case-normalized tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokenizer {
    /// Literal delimiter; an empty delimiter does not split
    pub delimiter: String,
    /// Case forced on every token
    pub case: CaseMode,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            delimiter: " ".to_string(),
            case: CaseMode::Preserve,
        }
    }
}

impl Tokenizer {
    pub fn new(delimiter: impl Into<String>, case: CaseMode) -> Self {
        Self {
            delimiter: delimiter.into(),
            case,
        }
    }

    /// Tokenize `text`. Never returns a blank token; keeps source order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text, &self.delimiter, self.case)
    }

    /// Tokenize `text` and append the tokens to `out`.
    pub fn tokenize_into(&self, text: &str, out: &mut Vec<String>) {
        out.extend(self.tokenize(text));
    }
}

/// Split `text` on the literal `delimiter`, trim, drop empties, force case.
pub fn tokenize(text: &str, delimiter: &str, case: CaseMode) -> Vec<String> {
    let pieces: Box<dyn Iterator<Item = &str>> = if delimiter.is_empty() {
        Box::new(std::iter::once(text))
    } else {
        Box::new(text.split(delimiter))
    };

    pieces
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| case.apply(piece))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_space() {
        let tokens = tokenize(
            "This is a test string. This is a second test string",
            " ",
            CaseMode::Preserve,
        );
        assert_eq!(
            tokens,
            vec![
                "This", "is", "a", "test", "string.", "This", "is", "a", "second", "test",
                "string"
            ]
        );
    }

    #[test]
    fn test_trims_and_drops_empty_pieces() {
        let tokens = tokenize("This,is,a, second,,test, ,string", ",", CaseMode::Preserve);
        assert_eq!(tokens, vec!["This", "is", "a", "second", "test", "string"]);
    }

    #[test]
    fn test_multi_character_delimiter_is_literal() {
        let tokens = tokenize("a.*b.*c", ".*", CaseMode::Preserve);
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_case_forcing() {
        let tokenizer = Tokenizer::new(" ", CaseMode::Upper);
        assert_eq!(tokenizer.tokenize("This is"), vec!["THIS", "IS"]);

        let tokenizer = Tokenizer::new(" ", CaseMode::Lower);
        assert_eq!(tokenizer.tokenize("This is"), vec!["this", "is"]);
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        assert!(tokenize("", " ", CaseMode::Preserve).is_empty());
        assert!(tokenize("   \t  ", " ", CaseMode::Preserve).is_empty());
    }

    #[test]
    fn test_empty_delimiter_keeps_whole_text() {
        let tokens = tokenize("  two words ", "", CaseMode::Preserve);
        assert_eq!(tokens, vec!["two words"]);
    }

    #[test]
    fn test_tokenize_into_appends() {
        let tokenizer = Tokenizer::default();
        let mut out = vec!["first".to_string()];
        tokenizer.tokenize_into("second third", &mut out);
        assert_eq!(out, vec!["first", "second", "third"]);
    }
}
