//! Source accumulation: walk every configured source and tokenize it.
//!
//! File sources are read first, line by line, then the source list in its
//! configured order. Trees are flattened depth-first, left to right. Record
//! sources are fetched from their provider and every queried field value is
//! tokenized in record order.

use std::path::PathBuf;

use log::debug;

use crate::source::files::{expand_file_sources, read_source_lines};
use crate::source::{RecordSource, Source};
use crate::Result;

use super::tokenizer::Tokenizer;

/// Produce the token multiset for `file_sources` followed by `sources`.
///
/// Nothing is returned unless every source resolves; a missing file or a
/// failing provider aborts the whole call.
pub fn accumulate(
    sources: &[Source],
    file_sources: &[PathBuf],
    tokenizer: &Tokenizer,
) -> Result<Vec<String>> {
    let mut tokens = Vec::new();

    for path in expand_file_sources(file_sources)? {
        let before = tokens.len();
        for line in read_source_lines(&path)? {
            tokenizer.tokenize_into(&line, &mut tokens);
        }
        debug!(
            "file source {} produced {} tokens",
            path.display(),
            tokens.len() - before
        );
    }

    for (index, source) in sources.iter().enumerate() {
        let before = tokens.len();
        match source {
            Source::Text(_) | Source::Tree(_) => {
                for leaf in source.leaves() {
                    tokenizer.tokenize_into(leaf, &mut tokens);
                }
            }
            Source::Records(records) => accumulate_records(records, tokenizer, &mut tokens)?,
        }
        debug!("source {} produced {} tokens", index, tokens.len() - before);
    }

    Ok(tokens)
}

fn accumulate_records(
    source: &RecordSource,
    tokenizer: &Tokenizer,
    tokens: &mut Vec<String>,
) -> Result<()> {
    let records = source.provider.fetch(&source.query)?;
    debug!(
        "record provider '{}' returned {} records",
        source.provider.name(),
        records.len()
    );

    for record in &records {
        for value in record.values(&source.query.select) {
            tokenizer.tokenize_into(value, tokens);
        }
    }
    Ok(())
}
