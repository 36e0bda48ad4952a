//! Error types for wordfreqlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a pipeline stage.
///
/// Advisory conditions (unused filters, empty results, malformed arguments to
/// the `add_*` convenience methods) are not errors; see [`crate::Warning`].
#[derive(Error, Debug)]
pub enum WordFreqError {
    /// A source element has a shape that is neither text, a string tree,
    /// nor a record provider paired with a query
    #[error("invalid source at position {index}: {reason}")]
    InvalidSourceKind { index: usize, reason: String },

    /// A file source does not exist
    #[error("source file not found: {0}")]
    SourceFileNotFound(PathBuf),

    /// A list, regex or substitution file does not exist
    #[error("list file not found: {0}")]
    ListFileNotFound(PathBuf),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid regular expression
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A substitution file is not a JSON object of strings
    #[error("invalid substitution file '{path}': {message}")]
    InvalidSubstitutionFile { path: PathBuf, message: String },

    /// A record provider failed to answer a query
    #[error("record provider '{provider}' failed: {message}")]
    Provider { provider: String, message: String },

    /// Malformed configuration document
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
