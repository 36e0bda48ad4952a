//! Locale-aware token comparison.
//!
//! A [`Collator`] is passed explicitly into every sort; there is no process
//! wide locale. Without a locale tokens compare byte-wise. With one, tokens
//! compare on three levels before falling back to bytes:
//!
//! 1. **primary**: letters with case and accents folded away (`ü` sorts
//!    with `u`), plus the locale's tailored letters
//! 2. **secondary**: accents (`u` before `ü`)
//! 3. **tertiary**: case (lowercase before uppercase)

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// A parsed locale tag such as `de_DE.UTF-8`, `sv-SE` or `de`.
///
/// Only the language and region are kept; encodings (`.UTF-8`) and
/// modifiers (`@euro`) are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Parse a single tag, `None` if it is not well formed.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let tag = tag.split(['.', '@']).next().unwrap_or(tag);
        let mut parts = tag.split(['_', '-']);

        let language = parts.next()?;
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }

        let region = match parts.next() {
            None => None,
            Some(region) if is_region(region) => Some(region.to_ascii_uppercase()),
            Some(_) => return None,
        };
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }

    /// The first well-formed tag among `candidates`.
    pub fn first_of<I, S>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .find_map(|candidate| Self::parse(candidate.as_ref()))
    }

    /// Parse a comma separated fallback list, e.g. `"de_DE@euro, de_DE, de"`.
    pub fn from_list(list: &str) -> Option<Self> {
        Self::first_of(list.split(','))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

fn is_region(region: &str) -> bool {
    (region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()))
        || (region.len() == 3 && region.chars().all(|c| c.is_ascii_digit()))
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_list(s).ok_or_else(|| format!("Invalid locale: {}", s))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

const fn after(base: char, offset: u32) -> u32 {
    ((base as u32) << 8) + offset
}

const NORDIC_SV: &[(char, u32)] = &[
    ('å', after('z', 1)),
    ('ä', after('z', 2)),
    ('æ', after('z', 2)),
    ('ö', after('z', 3)),
    ('ø', after('z', 3)),
];

const NORDIC_DA: &[(char, u32)] = &[
    ('æ', after('z', 1)),
    ('ä', after('z', 1)),
    ('ø', after('z', 2)),
    ('ö', after('z', 2)),
    ('å', after('z', 3)),
];

const SPANISH: &[(char, u32)] = &[('ñ', after('n', 1))];

/// Letters a locale moves away from their root position.
fn tailoring(language: &str) -> &'static [(char, u32)] {
    match language {
        "sv" | "fi" => NORDIC_SV,
        "da" | "nb" | "no" | "nn" => NORDIC_DA,
        "es" => SPANISH,
        _ => &[],
    }
}

/// Precomputed sort key. Keys compare level by level, then on raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<u32>,
    secondary: Vec<u32>,
    tertiary: Vec<u8>,
    raw: Vec<u8>,
}

/// Compares tokens for one locale, or byte-wise without one.
#[derive(Debug, Clone, Default)]
pub struct Collator {
    locale: Option<Locale>,
    tailored: &'static [(char, u32)],
}

impl Collator {
    /// Byte-wise comparison.
    pub fn binary() -> Self {
        Self::default()
    }

    pub fn for_locale(locale: &Locale) -> Self {
        Self {
            locale: Some(locale.clone()),
            tailored: tailoring(locale.language()),
        }
    }

    /// Binary when `locale` is `None`.
    pub fn new(locale: Option<&Locale>) -> Self {
        locale.map_or_else(Self::binary, Self::for_locale)
    }

    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self.locale {
            None => a.as_bytes().cmp(b.as_bytes()),
            Some(_) => self.key(a).cmp(&self.key(b)),
        }
    }

    /// Sort key of `token`; comparing keys equals comparing tokens.
    pub fn key(&self, token: &str) -> CollationKey {
        let raw = token.as_bytes().to_vec();
        if self.locale.is_none() {
            return CollationKey {
                primary: Vec::new(),
                secondary: Vec::new(),
                tertiary: Vec::new(),
                raw,
            };
        }

        let mut primary = Vec::with_capacity(token.len());
        let mut secondary = Vec::with_capacity(token.len());
        let mut tertiary = Vec::with_capacity(token.len());

        for ch in token.chars() {
            let case = u8::from(ch.is_uppercase());
            for lower in ch.to_lowercase() {
                if let Some(&(_, weight)) = self.tailored.iter().find(|(c, _)| *c == lower) {
                    primary.push(weight);
                    secondary.push(0);
                    tertiary.push(case);
                    continue;
                }
                if lower == 'ß' {
                    // expands to "ss", sorting after a written-out "ss"
                    primary.extend([after('s', 0), after('s', 0)]);
                    secondary.extend([0, 0]);
                    tertiary.extend([case, 2]);
                    continue;
                }
                decompose_canonical(lower, |part| {
                    if is_combining_mark(part) {
                        if let Some(last) = secondary.last_mut() {
                            if *last == 0 {
                                *last = part as u32;
                            }
                        }
                    } else {
                        primary.push(after(part, 0));
                        secondary.push(0);
                        tertiary.push(case);
                    }
                });
            }
        }

        CollationKey {
            primary,
            secondary,
            tertiary,
            raw,
        }
    }
}
