//! List filters: blacklist, whitelist and substitution.
//!
//! The three families share one configuration shape with four independent
//! slots, applied as sub-filters in this fixed order:
//!
//! 1. inline list
//! 2. list files (one term per line)
//! 3. inline regular expressions
//! 4. regular-expression files (one pattern per line)
//!
//! Empty slots are skipped. Case sensitivity only governs literal comparison;
//! pattern case handling belongs to the pattern itself (`#...#i`).
//!
//! ## Example
//!
//! ```rust
//! use wordfreqlib::filter::{blacklist, ListFilter};
//! use wordfreqlib::source::AssetResolver;
//!
//! let filter = ListFilter::new().terms(["this", "is"]);
//! let tokens: Vec<String> = ["This", "is", "a", "test"].iter().map(|s| s.to_string()).collect();
//! let kept = blacklist::apply(&tokens, &filter, &AssetResolver::new()).unwrap();
//! assert_eq!(kept, vec!["a", "test"]);
//! ```

pub mod blacklist;
pub mod numeric;
pub mod pattern;
pub mod substitution;
pub mod whitelist;

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::source::files::AssetResolver;
use crate::Result;

pub use numeric::{is_numeric, strip_numeric};
pub use pattern::Pattern;

/// The three list filter families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterFamily {
    BlackList,
    WhiteList,
    Substitution,
}

impl FilterFamily {
    pub const ALL: [FilterFamily; 3] = [
        FilterFamily::BlackList,
        FilterFamily::WhiteList,
        FilterFamily::Substitution,
    ];
}

impl fmt::Display for FilterFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FilterFamily::BlackList => "Blacklist",
            FilterFamily::WhiteList => "Whitelist",
            FilterFamily::Substitution => "Substitution list",
        })
    }
}

impl std::str::FromStr for FilterFamily {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "black" | "blacklist" => Ok(FilterFamily::BlackList),
            "white" | "whitelist" => Ok(FilterFamily::WhiteList),
            "sub" | "substitution" | "substitutionlist" => Ok(FilterFamily::Substitution),
            _ => Err(format!("Unknown filter family: {}", s)),
        }
    }
}

/// Configuration of a blacklist or whitelist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Inline literal terms
    pub terms: Vec<String>,
    /// Files of literal terms
    pub files: Vec<PathBuf>,
    /// Inline patterns
    pub patterns: Vec<Pattern>,
    /// Files of patterns
    pub pattern_files: Vec<PathBuf>,
    /// Literal comparison respects case
    pub case_sensitive: bool,
}

impl ListFilter {
    /// Create an empty, case-insensitive filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an inline term.
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.terms.push(term.into());
        self
    }

    /// Add several inline terms.
    pub fn terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Add a list file.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Add several list files.
    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add an inline pattern.
    pub fn pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns.push(Pattern::new(pattern)?);
        Ok(self)
    }

    /// Add several inline patterns.
    pub fn patterns(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.pattern(pattern)?;
        }
        Ok(self)
    }

    /// Add a pattern file.
    pub fn pattern_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.pattern_files.push(path.into());
        self
    }

    /// Add several pattern files.
    pub fn pattern_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.pattern_files.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Whether any of the four slots holds something.
    pub fn is_configured(&self) -> bool {
        !(self.terms.is_empty()
            && self.files.is_empty()
            && self.patterns.is_empty()
            && self.pattern_files.is_empty())
    }
}

/// Configuration of a substitution list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionFilter {
    /// Inline search/replacement pairs
    pub pairs: Vec<(String, String)>,
    /// Files of search/replacement maps
    pub files: Vec<PathBuf>,
    /// Inline pattern/replacement pairs
    pub patterns: Vec<(Pattern, String)>,
    /// Files of pattern/replacement maps
    pub pattern_files: Vec<PathBuf>,
    /// Literal search respects case
    pub case_sensitive: bool,
}

impl Default for SubstitutionFilter {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            files: Vec::new(),
            patterns: Vec::new(),
            pattern_files: Vec::new(),
            case_sensitive: true,
        }
    }
}

impl SubstitutionFilter {
    /// Create an empty, case-sensitive substitution list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `search` with `replacement`.
    pub fn pair(mut self, search: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.pairs.push((search.into(), replacement.into()));
        self
    }

    /// Add several search/replacement pairs.
    pub fn pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.pairs.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a substitution map file.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Add several substitution map files.
    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Replace matches of `pattern` with `replacement` (`$1` expands captures).
    pub fn pattern(mut self, pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        self.patterns.push((Pattern::new(pattern)?, replacement.into()));
        Ok(self)
    }

    /// Add a pattern substitution map file.
    pub fn pattern_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.pattern_files.push(path.into());
        self
    }

    /// Add several pattern substitution map files.
    pub fn pattern_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.pattern_files.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Whether any of the four slots holds something.
    pub fn is_configured(&self) -> bool {
        !(self.pairs.is_empty()
            && self.files.is_empty()
            && self.patterns.is_empty()
            && self.pattern_files.is_empty())
    }
}

/// Literal terms compared with or without case.
pub(crate) struct TermSet {
    terms: HashSet<String>,
    case_sensitive: bool,
}

impl TermSet {
    pub(crate) fn new<'a, I>(terms: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let terms = terms
            .into_iter()
            .map(|t| fold(t, case_sensitive))
            .collect();
        Self {
            terms,
            case_sensitive,
        }
    }

    pub(crate) fn contains(&self, token: &str) -> bool {
        if self.case_sensitive {
            self.terms.contains(token)
        } else {
            self.terms.contains(&token.to_lowercase())
        }
    }
}

pub(crate) fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

/// Read and concatenate the terms of several list files.
pub(crate) fn load_terms(files: &[PathBuf], assets: &AssetResolver) -> Result<Vec<String>> {
    let mut terms = Vec::new();
    for file in files {
        terms.extend(assets.read_terms(file)?);
    }
    Ok(terms)
}

/// Read and concatenate the patterns of several pattern files.
pub(crate) fn load_patterns(files: &[PathBuf], assets: &AssetResolver) -> Result<Vec<Pattern>> {
    let mut patterns = Vec::new();
    for file in files {
        patterns.extend(assets.read_patterns(file)?);
    }
    Ok(patterns)
}
