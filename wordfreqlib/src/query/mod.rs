//! Query processing: count, collate and sort tokens.
//!
//! This module handles the last stage of the pipeline - turning the filtered
//! token multiset into an ordered frequency table. It provides:
//!
//! - **Options**: case forcing and sort directions (`CaseMode`, `SortSpec`)
//! - **Collation**: explicit, locale-aware token comparison (`Collator`)
//! - **FrequencyTable**: unique tokens with counts, in table order
//!
//! ## Example
//!
//! ```rust
//! use wordfreqlib::query::{Collator, FrequencyTable, SortSpec};
//!
//! let mut table = FrequencyTable::count_tokens("b a b".split(' '));
//! table.sort(&SortSpec::most_frequent(), &Collator::binary());
//! assert_eq!(table.tokens(), vec!["b", "a"]);
//! ```

pub mod collation;
pub mod frequency;
pub mod options;

pub use collation::{CollationKey, Collator, Locale};
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use options::{CaseMode, SortDirection, SortSpec};
