//! Whitelist: keep only tokens equal to a listed term or matching a pattern.
//!
//! Every non-empty slot is its own pass, so configuring both terms and
//! patterns keeps the intersection. Within one pattern pass a token survives
//! if any pattern matches; it is credited to the first pattern that does.

use log::debug;

use crate::source::files::AssetResolver;
use crate::Result;

use super::{load_patterns, load_terms, ListFilter, Pattern, TermSet};

/// Apply every configured whitelist slot to `tokens`.
///
/// All list and pattern files are read before any token is touched.
pub fn apply(
    tokens: &[String],
    filter: &ListFilter,
    assets: &AssetResolver,
) -> Result<Vec<String>> {
    let file_terms = load_terms(&filter.files, assets)?;
    let file_patterns = load_patterns(&filter.pattern_files, assets)?;

    let mut kept = tokens.to_vec();
    if !filter.terms.is_empty() {
        kept = keep_terms(kept, &filter.terms, filter.case_sensitive);
    }
    if !filter.files.is_empty() {
        kept = keep_terms(kept, &file_terms, filter.case_sensitive);
    }
    if !filter.patterns.is_empty() {
        kept = keep_matches(kept, &filter.patterns);
    }
    if !filter.pattern_files.is_empty() {
        kept = keep_matches(kept, &file_patterns);
    }

    debug!("whitelist kept {} of {} tokens", kept.len(), tokens.len());
    Ok(kept)
}

fn keep_terms(mut tokens: Vec<String>, terms: &[String], case_sensitive: bool) -> Vec<String> {
    let set = TermSet::new(terms, case_sensitive);
    tokens.retain(|token| set.contains(token));
    tokens
}

fn keep_matches(tokens: Vec<String>, patterns: &[Pattern]) -> Vec<String> {
    let (kept, credits) = credit_matches(tokens, patterns);
    for (pattern, hits) in patterns.iter().zip(&credits) {
        debug!("whitelist pattern {} matched {} tokens", pattern, hits);
    }
    kept
}

/// Keep tokens matching any pattern, in their original order, and count how
/// many each pattern was credited with. A token counts once, for the first
/// pattern that matches it.
pub(crate) fn credit_matches(
    tokens: Vec<String>,
    patterns: &[Pattern],
) -> (Vec<String>, Vec<usize>) {
    let mut credits = vec![0; patterns.len()];
    let kept = tokens
        .into_iter()
        .filter(|token| match patterns.iter().position(|p| p.is_match(token)) {
            Some(index) => {
                credits[index] += 1;
                true
            }
            None => false,
        })
        .collect();
    (kept, credits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn base_tokens() -> Vec<String> {
        "This is a test string. This is a second test string"
            .split(' ')
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_inline_terms() {
        let insensitive = ListFilter::new().terms(["this", "is"]);
        let kept = apply(&base_tokens(), &insensitive, &AssetResolver::new()).unwrap();
        assert_eq!(kept, vec!["This", "is", "This", "is"]);

        let sensitive = insensitive.case_sensitive(true);
        let kept = apply(&base_tokens(), &sensitive, &AssetResolver::new()).unwrap();
        assert_eq!(kept, vec!["is", "is"]);
    }

    #[test]
    fn test_pattern_union_without_double_count() {
        let patterns = super::super::pattern::compile_all(["#T#", "#is#", "#^[Tt]#"]).unwrap();
        let (kept, credits) = credit_matches(base_tokens(), &patterns);
        assert_eq!(kept, vec!["This", "is", "test", "This", "is", "test"]);
        // "This" goes to #T#, "is" to #is#, "test" to #^[Tt]#
        assert_eq!(credits, vec![2, 2, 2]);
    }

    #[test]
    fn test_terms_and_patterns_intersect() {
        let filter = ListFilter::new()
            .terms(["this", "is", "a"])
            .pattern("^[Tt]")
            .unwrap();
        let kept = apply(&base_tokens(), &filter, &AssetResolver::new()).unwrap();
        assert_eq!(kept, vec!["This", "This"]);
    }

    #[test]
    fn test_list_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("white.txt"), "this\nis\n").unwrap();
        let filter = ListFilter::new().file("white.txt");
        let kept = apply(&base_tokens(), &filter, &AssetResolver::with_base(dir.path())).unwrap();
        assert_eq!(kept, vec!["This", "is", "This", "is"]);
    }

    #[test]
    fn test_no_match_empties_tokens() {
        let filter = ListFilter::new().term("absent");
        let kept = apply(&base_tokens(), &filter, &AssetResolver::new()).unwrap();
        assert!(kept.is_empty());
    }
}
