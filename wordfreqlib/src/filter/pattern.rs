//! Regular-expression patterns for list filters.
//!
//! Patterns may be written bare (`^[Tt]`) or delimited with trailing flags
//! (`#^t#i`, `/\.$/`). Delimited patterns have their delimiters stripped and
//! their flags applied:
//!
//! | flag | effect                     |
//! |------|----------------------------|
//! | `i`  | case-insensitive           |
//! | `m`  | `^`/`$` match at lines     |
//! | `s`  | `.` matches newlines       |
//! | `x`  | ignore whitespace/comments |
//! | `U`  | swap greediness            |
//! | `u`  | accepted, Unicode is on    |

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::WordFreqError;
use crate::Result;

/// Characters accepted as pattern delimiters.
const DELIMITERS: &[char] = &['/', '#', '~', '!', '@', '%', '`', ';', ','];

/// Trailing flags accepted after the closing delimiter.
const FLAGS: &str = "imsxuU";

/// A compiled pattern that remembers how it was written.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a bare or delimited pattern.
    pub fn new(source: &str) -> Result<Self> {
        let invalid = |message: String| WordFreqError::InvalidPattern {
            pattern: source.to_string(),
            message,
        };

        let (body, flags) = split_delimited(source).unwrap_or((source, ""));
        let mut builder = RegexBuilder::new(body);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'U' => builder.swap_greed(true),
                _ => &mut builder,
            };
        }
        let regex = builder.build().map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Split `PATTERN=VALUE` into its two halves.
    ///
    /// A delimited pattern ends at the closing delimiter and its flags, so
    /// `#a=b#i=X` splits into `#a=b#i` and `X`. Anything else splits on the
    /// first `=`.
    pub fn split_assignment(text: &str) -> Option<(&str, &str)> {
        if let Some(delimiter) = text.chars().next().filter(|c| DELIMITERS.contains(c)) {
            let start = delimiter.len_utf8();
            for (offset, _) in text[start..].match_indices(delimiter) {
                let after = start + offset + delimiter.len_utf8();
                let rest = &text[after..];
                let flags = rest.find(|c: char| !FLAGS.contains(c)).unwrap_or(rest.len());
                if rest[flags..].starts_with('=') {
                    let split = after + flags;
                    return Some((&text[..split], &text[split + 1..]));
                }
            }
        }
        text.split_once('=')
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split `#body#flags` into `(body, flags)`; `None` for bare patterns.
fn split_delimited(source: &str) -> Option<(&str, &str)> {
    let delimiter = source.chars().next()?;
    if !DELIMITERS.contains(&delimiter) {
        return None;
    }
    let rest = &source[delimiter.len_utf8()..];
    let end = rest.rfind(delimiter)?;
    let flags = &rest[end + delimiter.len_utf8()..];
    if !flags.chars().all(|c| FLAGS.contains(c)) {
        return None;
    }
    Some((&rest[..end], flags))
}

/// Compile several patterns, failing on the first invalid one.
pub fn compile_all<I, S>(sources: I) -> Result<Vec<Pattern>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sources
        .into_iter()
        .map(|s| Pattern::new(s.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_pattern() {
        let pattern = Pattern::new("^[Tt]").unwrap();
        assert!(pattern.is_match("This"));
        assert!(pattern.is_match("test"));
        assert!(!pattern.is_match("is"));
        assert_eq!(pattern.as_str(), "^[Tt]");
    }

    #[test]
    fn test_delimited_pattern() {
        let pattern = Pattern::new("#^[Tt]#").unwrap();
        assert_eq!(pattern.regex().as_str(), "^[Tt]");
        assert!(pattern.is_match("test"));
        assert!(!pattern.is_match("a"));
    }

    #[test]
    fn test_delimited_pattern_with_flags() {
        let pattern = Pattern::new("/^this$/i").unwrap();
        assert!(pattern.is_match("THIS"));
        assert!(pattern.is_match("This"));

        let sensitive = Pattern::new("/^this$/").unwrap();
        assert!(!sensitive.is_match("This"));
    }

    #[test]
    fn test_trailing_text_is_not_flags() {
        // Closing '#' followed by non-flag text: used as a bare pattern
        let pattern = Pattern::new("#a#bc").unwrap();
        assert_eq!(pattern.regex().as_str(), "#a#bc");
    }

    #[test]
    fn test_lone_delimiter_is_bare() {
        let pattern = Pattern::new("/").unwrap();
        assert!(pattern.is_match("a/b"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = Pattern::new("#[unclosed#");
        match result {
            Err(WordFreqError::InvalidPattern { pattern, .. }) => {
                assert_eq!(pattern, "#[unclosed#");
            }
            other => panic!("Expected InvalidPattern error, got {:?}", other),
        }
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(Pattern::split_assignment("#a=b#=X"), Some(("#a=b#", "X")));
        assert_eq!(Pattern::split_assignment("/x=y/i=a=b"), Some(("/x=y/i", "a=b")));
        assert_eq!(Pattern::split_assignment("^t=XXX"), Some(("^t", "XXX")));
        assert_eq!(Pattern::split_assignment("#[Tt]#="), Some(("#[Tt]#", "")));
        assert_eq!(Pattern::split_assignment("#open=X"), Some(("#open", "X")));
        assert_eq!(Pattern::split_assignment("no-separator"), None);
    }

    #[test]
    fn test_compile_all() {
        let patterns = compile_all(["#T#", "#is#", "#^[Tt]#"]).unwrap();
        assert_eq!(patterns.len(), 3);
        assert!(compile_all(["ok", "(bad"]).is_err());
    }
}
