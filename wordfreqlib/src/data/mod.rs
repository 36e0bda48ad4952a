//! Data collection: turn sources into tokens.
//!
//! This module handles the second stage of the pipeline - reading every
//! configured source and splitting it into tokens. It provides:
//!
//! - **Tokenizing**: literal delimiter split with trimming and case forcing
//! - **Accumulation**: file sources, text, string trees and record sources,
//!   in configured order
//!
//! ## Example
//!
//! ```rust
//! use wordfreqlib::data::{accumulate, Tokenizer};
//! use wordfreqlib::source::Source;
//!
//! let tokens = accumulate(&[Source::from("a b  a")], &[], &Tokenizer::default()).unwrap();
//! assert_eq!(tokens, vec!["a", "b", "a"]);
//! ```

pub mod accumulator;
pub mod tokenizer;

pub use accumulator::accumulate;
pub use tokenizer::{tokenize, Tokenizer};
