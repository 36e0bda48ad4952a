//! Substitution: rewrite tokens through search/replacement maps.
//!
//! Literal maps are applied as one simultaneous pass: at every position the
//! longest matching key wins and replaced text is never searched again.
//! Pattern maps work the same way, with the earliest match winning and ties
//! going to the pattern listed first. Tokens left empty by a pass are dropped
//! before the next pass runs.

use std::collections::HashMap;

use log::debug;
use regex::{Captures, Regex, RegexBuilder};

use crate::error::WordFreqError;
use crate::source::files::AssetResolver;
use crate::Result;

use super::{fold, Pattern, SubstitutionFilter};

/// Simultaneous literal search/replace.
#[derive(Debug, Clone)]
pub struct LiteralReplacer {
    matcher: Regex,
    replacements: HashMap<String, String>,
    case_sensitive: bool,
}

impl LiteralReplacer {
    /// Build a replacer from ordered pairs; a later duplicate key overrides an
    /// earlier one. Returns `None` when no pair has a non-empty key.
    pub fn new(pairs: &[(String, String)], case_sensitive: bool) -> Result<Option<Self>> {
        let mut replacements = HashMap::new();
        let mut keys: Vec<&str> = Vec::new();
        for (search, replacement) in pairs {
            if search.is_empty() {
                continue;
            }
            if replacements
                .insert(fold(search, case_sensitive), replacement.clone())
                .is_none()
            {
                keys.push(search);
            }
        }
        if keys.is_empty() {
            return Ok(None);
        }

        keys.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = keys
            .iter()
            .map(|key| regex::escape(key))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = RegexBuilder::new(&alternation)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| WordFreqError::InvalidPattern {
                pattern: alternation.clone(),
                message: e.to_string(),
            })?;

        Ok(Some(Self {
            matcher,
            replacements,
            case_sensitive,
        }))
    }

    pub fn replace(&self, text: &str) -> String {
        self.matcher
            .replace_all(text, |caps: &Captures| {
                let found = &caps[0];
                self.replacements
                    .get(&fold(found, self.case_sensitive))
                    .cloned()
                    .unwrap_or_else(|| found.to_string())
            })
            .into_owned()
    }
}

/// Simultaneous multi-pattern replace with `$1` capture expansion.
#[derive(Debug, Clone)]
pub struct PatternReplacer {
    rules: Vec<(Pattern, String)>,
}

impl PatternReplacer {
    pub fn new(rules: Vec<(Pattern, String)>) -> Self {
        Self { rules }
    }

    pub fn replace(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while pos <= text.len() {
            let mut best: Option<(usize, Captures)> = None;
            for (index, (pattern, _)) in self.rules.iter().enumerate() {
                let Some(caps) = pattern.regex().captures_at(text, pos) else {
                    continue;
                };
                let start = caps.get(0).map_or(usize::MAX, |m| m.start());
                let earlier = match &best {
                    Some((_, current)) => start < current.get(0).map_or(usize::MAX, |m| m.start()),
                    None => true,
                };
                if earlier {
                    best = Some((index, caps));
                }
            }

            let Some((index, caps)) = best else { break };
            let Some(whole) = caps.get(0) else { break };
            out.push_str(&text[pos..whole.start()]);
            caps.expand(&self.rules[index].1, &mut out);

            if whole.is_empty() {
                match text[whole.end()..].chars().next() {
                    Some(c) => {
                        out.push(c);
                        pos = whole.end() + c.len_utf8();
                    }
                    None => {
                        pos = text.len();
                        break;
                    }
                }
            } else {
                pos = whole.end();
            }
        }

        if pos < text.len() {
            out.push_str(&text[pos..]);
        }
        out
    }
}

/// Apply every configured substitution slot to `tokens`.
///
/// All maps are loaded and compiled before any token is rewritten. Several
/// map files in one slot merge in order.
pub fn apply(
    tokens: &[String],
    filter: &SubstitutionFilter,
    assets: &AssetResolver,
) -> Result<Vec<String>> {
    let mut file_pairs = Vec::new();
    for file in &filter.files {
        file_pairs.extend(assets.read_substitutions(file)?);
    }
    let mut file_rules = Vec::new();
    for file in &filter.pattern_files {
        file_rules.extend(assets.read_pattern_substitutions(file)?);
    }

    let inline_literal = LiteralReplacer::new(&filter.pairs, filter.case_sensitive)?;
    let file_literal = LiteralReplacer::new(&file_pairs, filter.case_sensitive)?;

    let mut current = tokens.to_vec();
    if let Some(replacer) = &inline_literal {
        current = rewrite(current, |t| replacer.replace(t));
    }
    if let Some(replacer) = &file_literal {
        current = rewrite(current, |t| replacer.replace(t));
    }
    if !filter.patterns.is_empty() {
        let replacer = PatternReplacer::new(filter.patterns.clone());
        current = rewrite(current, |t| replacer.replace(t));
    }
    if !file_rules.is_empty() {
        let replacer = PatternReplacer::new(dedup_rules(file_rules));
        current = rewrite(current, |t| replacer.replace(t));
    }

    debug!(
        "substitution rewrote {} tokens into {}",
        tokens.len(),
        current.len()
    );
    Ok(current)
}

/// Rewrite every token and drop those left empty.
fn rewrite(tokens: Vec<String>, replace: impl Fn(&str) -> String) -> Vec<String> {
    tokens
        .iter()
        .map(|token| replace(token))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Merged pattern maps: a later duplicate pattern replaces the earlier rule
/// in place.
fn dedup_rules(rules: Vec<(Pattern, String)>) -> Vec<(Pattern, String)> {
    let mut merged: Vec<(Pattern, String)> = Vec::with_capacity(rules.len());
    for (pattern, replacement) in rules {
        match merged.iter_mut().find(|(existing, _)| *existing == pattern) {
            Some(slot) => slot.1 = replacement,
            None => merged.push((pattern, replacement)),
        }
    }
    merged
}
