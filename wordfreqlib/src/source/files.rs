//! File-backed inputs: file sources, list files, pattern files and
//! substitution maps.
//!
//! File sources are read relative to the working directory and may be glob
//! patterns. List, pattern and substitution files are resolved against an
//! optional assets directory through [`AssetResolver`].

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::WordFreqError;
use crate::filter::pattern::Pattern;
use crate::Result;

/// Resolves relative list/pattern/substitution file names against an
/// assets directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetResolver {
    base: Option<PathBuf>,
}

impl AssetResolver {
    /// Resolve paths as given (relative to the working directory).
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Read a list file: one literal term per line, blank lines skipped.
    pub fn read_terms(&self, path: &Path) -> Result<Vec<String>> {
        read_lines(&self.resolve(path), WordFreqError::ListFileNotFound)
    }

    /// Read a pattern file: one regular expression per line, blank lines skipped.
    pub fn read_patterns(&self, path: &Path) -> Result<Vec<Pattern>> {
        self.read_terms(path)?
            .iter()
            .map(|line| Pattern::new(line))
            .collect()
    }

    /// Read a substitution map: a JSON object of `"search": "replacement"`
    /// pairs, in document order.
    pub fn read_substitutions(&self, path: &Path) -> Result<Vec<(String, String)>> {
        let resolved = self.resolve(path);
        let content = read_file(&resolved, WordFreqError::ListFileNotFound)?;
        let pairs: OrderedPairs =
            serde_json::from_str(&content).map_err(|e| WordFreqError::InvalidSubstitutionFile {
                path: resolved.clone(),
                message: e.to_string(),
            })?;
        Ok(pairs.0)
    }

    /// Read a regex substitution map: a JSON object of
    /// `"pattern": "replacement"` pairs, in document order.
    pub fn read_pattern_substitutions(&self, path: &Path) -> Result<Vec<(Pattern, String)>> {
        self.read_substitutions(path)?
            .into_iter()
            .map(|(pattern, replacement)| Ok((Pattern::new(&pattern)?, replacement)))
            .collect()
    }
}

/// Check whether a file source entry is a glob pattern rather than a path.
fn is_glob(path: &Path) -> bool {
    path.to_string_lossy()
        .chars()
        .any(|c| matches!(c, '*' | '?' | '['))
}

/// Expand file source entries into concrete paths.
///
/// Plain paths must exist. Glob patterns are expanded in sorted order and must
/// match at least one file.
pub fn expand_file_sources(entries: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in entries {
        if !is_glob(entry) {
            if !entry.is_file() {
                return Err(WordFreqError::SourceFileNotFound(entry.clone()));
            }
            files.push(entry.clone());
            continue;
        }

        let pattern = entry.to_string_lossy();
        let paths = glob::glob(&pattern).map_err(|e| WordFreqError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        let mut matched: Vec<PathBuf> = paths
            .filter_map(|p| p.ok())
            .filter(|p| p.is_file())
            .collect();
        if matched.is_empty() {
            return Err(WordFreqError::SourceFileNotFound(entry.clone()));
        }
        // Sort for deterministic traversal
        matched.sort();
        files.extend(matched);
    }

    Ok(files)
}

/// Read the non-blank lines of a file source.
pub fn read_source_lines(path: &Path) -> Result<Vec<String>> {
    read_lines(path, WordFreqError::SourceFileNotFound)
}

fn read_file(path: &Path, not_found: fn(PathBuf) -> WordFreqError) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => not_found(path.to_path_buf()),
        _ => WordFreqError::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

fn read_lines(path: &Path, not_found: fn(PathBuf) -> WordFreqError) -> Result<Vec<String>> {
    let content = read_file(path, not_found)?;
    Ok(content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// A JSON object read as an ordered list of string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedPairs(pub Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = OrderedPairs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping search strings to replacements")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut pairs = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    pairs.push((key, value));
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}
