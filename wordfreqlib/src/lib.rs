//! # wordfreqlib
//!
//! A token frequency library: gather text from several kinds of sources,
//! filter the tokens, and count them into an ordered frequency table.
//!
//! ## Overview
//!
//! The pipeline runs in explicit stages:
//!
//! - **Accumulate**: text, nested string trees, newline-delimited files and
//!   structured record providers are split on a literal delimiter
//! - **Filter**: blacklists, whitelists and substitution lists, each built
//!   from inline terms, list files, inline patterns and pattern files
//! - **Generate**: numeric tokens are optionally stripped, tokens are counted
//!   and the table is sorted by token, by frequency, or both
//!
//! Misuse that does not stop a run (a filter configured but never run, no
//! sources at all) is reported as [`Warning`]s, both through the `log`
//! facade and on the pipeline itself.
//!
//! ## Features
//!
//! - **Fluent stages**: every stage returns the pipeline for chaining
//! - **Atomic stages**: a failing stage leaves the pipeline untouched
//! - **Explicit collation**: locale-aware sorting without global state
//! - **Declarative config**: the whole pipeline can be read from JSON
//!
//! ## Example
//!
//! ```rust
//! use wordfreqlib::{ListFilter, SortDirection, SubstitutionFilter, WordFrequency};
//!
//! let mut wf = WordFrequency::new()
//!     .source("This is a test string. This is a second test string")
//!     .substitution(SubstitutionFilter::new().pair(".", ""))
//!     .black_list(ListFilter::new().terms(["this", "is", "a"]))
//!     .sort_by_frequency(SortDirection::Descending);
//!
//! wf.accumulate_sources()?
//!     .run_substitution_list_filter()?
//!     .run_black_list_filter()?;
//!
//! let table = wf.generate(None);
//! assert_eq!(table.get("string"), Some(2));
//! assert_eq!(table.tokens(), vec!["string", "test", "second"]);
//! # Ok::<(), wordfreqlib::WordFreqError>(())
//! ```

pub mod audit;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod source;

pub use audit::{Visits, Warning};
pub use config::{ListConfig, SubstitutionConfig, WordFrequencyConfig};
pub use data::{tokenize, Tokenizer};
pub use error::WordFreqError;
pub use filter::{FilterFamily, ListFilter, Pattern, SubstitutionFilter};
pub use output::{FrequencyView, TableRow};
pub use pipeline::WordFrequency;
pub use query::{
    CaseMode, Collator, FrequencyEntry, FrequencyTable, Locale, SortDirection, SortSpec,
};
pub use source::{
    MemoryRecordStore, ProviderRegistry, Record, RecordProvider, RecordQuery, Source, SourceNode,
};

/// Result type for wordfreqlib operations
pub type Result<T> = std::result::Result<T, WordFreqError>;
