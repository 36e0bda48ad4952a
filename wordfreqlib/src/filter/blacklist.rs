//! Blacklist: remove tokens equal to a listed term or matching a pattern.

use log::debug;

use crate::source::files::AssetResolver;
use crate::Result;

use super::{load_patterns, load_terms, ListFilter, Pattern, TermSet};

/// Apply every configured blacklist slot to `tokens`.
///
/// All list and pattern files are read before any token is touched, so a
/// missing file leaves the caller's tokens as they were.
pub fn apply(
    tokens: &[String],
    filter: &ListFilter,
    assets: &AssetResolver,
) -> Result<Vec<String>> {
    let file_terms = load_terms(&filter.files, assets)?;
    let file_patterns = load_patterns(&filter.pattern_files, assets)?;

    let mut kept = tokens.to_vec();
    if !filter.terms.is_empty() {
        kept = remove_terms(kept, &filter.terms, filter.case_sensitive);
    }
    if !filter.files.is_empty() {
        kept = remove_terms(kept, &file_terms, filter.case_sensitive);
    }
    if !filter.patterns.is_empty() {
        kept = remove_matches(kept, &filter.patterns);
    }
    if !filter.pattern_files.is_empty() {
        kept = remove_matches(kept, &file_patterns);
    }

    debug!("blacklist removed {} of {} tokens", tokens.len() - kept.len(), tokens.len());
    Ok(kept)
}

fn remove_terms(mut tokens: Vec<String>, terms: &[String], case_sensitive: bool) -> Vec<String> {
    let set = TermSet::new(terms, case_sensitive);
    tokens.retain(|token| !set.contains(token));
    tokens
}

/// One retain pass per pattern; survivors of a pass meet the next pattern.
fn remove_matches(mut tokens: Vec<String>, patterns: &[Pattern]) -> Vec<String> {
    for pattern in patterns {
        tokens.retain(|token| !pattern.is_match(token));
    }
    tokens
}
