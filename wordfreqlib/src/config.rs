//! Declarative pipeline configuration.
//!
//! A [`WordFrequencyConfig`] is the serde form of everything that can be set
//! on a [`crate::WordFrequency`] before it runs. Every field is optional:
//!
//! ```json
//! {
//!   "delimiter": " ",
//!   "force_case": "lower",
//!   "remove_numeric": true,
//!   "sort_by_frequency": "desc",
//!   "locale": "de_DE@euro, de_DE, de",
//!   "assets_dir": "assets",
//!   "black_list": { "terms": ["this", "is"], "files": ["blacklist_en.txt"] },
//!   "substitution": { "files": ["punctuation_en.json"] },
//!   "sources": ["This is a test string.", [["nested"], ["tree"]]]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::WordFreqError;
use crate::filter::{ListFilter, SubstitutionFilter};
use crate::query::{CaseMode, Locale, SortDirection, SortSpec};
use crate::source::{kind_name, OrderedPairs};
use crate::Result;

/// Blacklist or whitelist section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// Terms; nested lists are flattened
    #[serde(deserialize_with = "flatten_terms")]
    pub terms: Vec<String>,
    pub files: Vec<PathBuf>,
    pub patterns: Vec<String>,
    pub pattern_files: Vec<PathBuf>,
    pub case_sensitive: Option<bool>,
}

impl ListConfig {
    /// Compile into a filter; case-insensitive unless set.
    pub fn into_filter(self) -> Result<ListFilter> {
        let mut filter = ListFilter::new()
            .terms(self.terms)
            .files(self.files)
            .pattern_files(self.pattern_files)
            .case_sensitive(self.case_sensitive.unwrap_or(false));
        for pattern in &self.patterns {
            filter = filter.pattern(pattern)?;
        }
        Ok(filter)
    }
}

/// Substitution section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubstitutionConfig {
    /// `{"search": "replacement"}` in document order
    pub pairs: OrderedPairs,
    pub files: Vec<PathBuf>,
    /// `{"pattern": "replacement"}` in document order
    pub patterns: OrderedPairs,
    pub pattern_files: Vec<PathBuf>,
    pub case_sensitive: Option<bool>,
}

impl SubstitutionConfig {
    /// Compile into a filter; case-sensitive unless set.
    pub fn into_filter(self) -> Result<SubstitutionFilter> {
        let mut filter = SubstitutionFilter::new()
            .pairs(self.pairs.0)
            .files(self.files)
            .pattern_files(self.pattern_files)
            .case_sensitive(self.case_sensitive.unwrap_or(true));
        for (pattern, replacement) in self.patterns.0 {
            filter = filter.pattern(&pattern, replacement)?;
        }
        Ok(filter)
    }
}

/// Everything configurable on a pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WordFrequencyConfig {
    pub delimiter: String,
    pub force_case: CaseMode,
    pub remove_numeric: bool,
    pub sort_by_token: SortDirection,
    pub sort_by_frequency: SortDirection,
    /// A locale tag or a comma separated fallback list
    pub locale: Option<String>,
    /// Base directory for list, pattern and substitution files
    pub assets_dir: Option<PathBuf>,
    pub black_list: ListConfig,
    pub white_list: ListConfig,
    pub substitution: SubstitutionConfig,
    /// Untyped sources, resolved when the pipeline is built
    pub sources: Vec<Value>,
    pub file_sources: Vec<PathBuf>,
}

impl Default for WordFrequencyConfig {
    fn default() -> Self {
        Self {
            delimiter: " ".to_string(),
            force_case: CaseMode::default(),
            remove_numeric: false,
            sort_by_token: SortDirection::default(),
            sort_by_frequency: SortDirection::default(),
            locale: None,
            assets_dir: None,
            black_list: ListConfig::default(),
            white_list: ListConfig::default(),
            substitution: SubstitutionConfig::default(),
            sources: Vec::new(),
            file_sources: Vec::new(),
        }
    }
}

impl WordFrequencyConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WordFreqError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| WordFreqError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    pub fn sort(&self) -> SortSpec {
        SortSpec::new()
            .by_token(self.sort_by_token)
            .by_frequency(self.sort_by_frequency)
    }

    /// The configured locale, if any; an unusable tag list is an error.
    pub fn parsed_locale(&self) -> Result<Option<Locale>> {
        match &self.locale {
            None => Ok(None),
            Some(list) => Locale::from_list(list)
                .map(Some)
                .ok_or_else(|| WordFreqError::Config(format!("no usable locale in '{}'", list))),
        }
    }
}

fn flatten_terms<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    fn walk(value: Value, out: &mut Vec<String>) -> std::result::Result<(), String> {
        match value {
            Value::String(s) => out.push(s),
            Value::Number(n) => out.push(n.to_string()),
            Value::Array(items) => {
                for item in items {
                    walk(item, out)?;
                }
            }
            other => return Err(format!("terms must be strings, found {}", kind_name(&other))),
        }
        Ok(())
    }

    let mut terms = Vec::new();
    walk(Value::deserialize(deserializer)?, &mut terms).map_err(serde::de::Error::custom)?;
    Ok(terms)
}
