//! Options controlling token case and the ordering of frequency tables.
//!
//! Both option types accept the historical signed-integer encoding
//! (negative / zero / positive) as well as their textual names, so they can
//! be read from configuration documents written either way.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Case forcing applied to every token during tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    /// Force uppercase
    Upper,
    /// Force lowercase
    Lower,
    /// Leave tokens as they appear in the source
    #[default]
    Preserve,
}

impl CaseMode {
    /// Map the signed encoding: negative lowers, positive uppers, zero preserves.
    pub fn from_signed(value: i64) -> Self {
        match value.signum() {
            1 => CaseMode::Upper,
            -1 => CaseMode::Lower,
            _ => CaseMode::Preserve,
        }
    }

    /// Apply the case mode to a piece of text.
    pub fn apply(self, text: &str) -> String {
        match self {
            CaseMode::Upper => text.to_uppercase(),
            CaseMode::Lower => text.to_lowercase(),
            CaseMode::Preserve => text.to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaseMode::Upper => "upper",
            CaseMode::Lower => "lower",
            CaseMode::Preserve => "preserve",
        }
    }
}

impl FromStr for CaseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upper" | "uppercase" => Ok(CaseMode::Upper),
            "lower" | "lowercase" => Ok(CaseMode::Lower),
            "preserve" | "none" | "keep" => Ok(CaseMode::Preserve),
            other => other
                .parse::<i64>()
                .map(CaseMode::from_signed)
                .map_err(|_| format!("Unknown case mode: {}", s)),
        }
    }
}

/// Sort direction for one sort dimension.
///
/// Unlike a plain ascending/descending switch, `None` is a real state: the
/// dimension does not take part in ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Largest / last first
    Descending,
    /// Not sorted on this dimension
    #[default]
    None,
    /// Smallest / first first
    Ascending,
}

impl SortDirection {
    /// Map the signed encoding: negative descends, positive ascends, zero disables.
    pub fn from_signed(value: i64) -> Self {
        match value.signum() {
            1 => SortDirection::Ascending,
            -1 => SortDirection::Descending,
            _ => SortDirection::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == SortDirection::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Descending => "desc",
            SortDirection::None => "none",
            SortDirection::Ascending => "asc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            "none" | "off" => Ok(SortDirection::None),
            other => other
                .parse::<i64>()
                .map(SortDirection::from_signed)
                .map_err(|_| format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Sort configuration for the frequency table.
///
/// When `by_frequency` is set it is the primary key and `by_token` only
/// breaks ties (ascending unless `by_token` is descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    /// Order by token text
    #[serde(default)]
    pub by_token: SortDirection,
    /// Order by occurrence count
    #[serde(default)]
    pub by_frequency: SortDirection,
}

impl SortSpec {
    /// No ordering: tokens stay in first-occurrence order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Order by token text
    pub fn by_token(mut self, direction: SortDirection) -> Self {
        self.by_token = direction;
        self
    }

    /// Order by occurrence count
    pub fn by_frequency(mut self, direction: SortDirection) -> Self {
        self.by_frequency = direction;
        self
    }

    /// Most frequent first, ties broken alphabetically.
    pub fn most_frequent() -> Self {
        Self::new().by_frequency(SortDirection::Descending)
    }

    /// Alphabetical order only.
    pub fn alphabetical() -> Self {
        Self::new().by_token(SortDirection::Ascending)
    }

    /// Whether any sorting happens at all.
    pub fn is_unsorted(&self) -> bool {
        self.by_token.is_none() && self.by_frequency.is_none()
    }
}

/// Accepts either a signed integer or a textual name.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignedOrName {
    Signed(i64),
    Name(String),
}

impl Serialize for CaseMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CaseMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match SignedOrName::deserialize(deserializer)? {
            SignedOrName::Signed(n) => Ok(CaseMode::from_signed(n)),
            SignedOrName::Name(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for SortDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match SignedOrName::deserialize(deserializer)? {
            SignedOrName::Signed(n) => Ok(SortDirection::from_signed(n)),
            SignedOrName::Name(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_mode_from_signed() {
        assert_eq!(CaseMode::from_signed(17), CaseMode::Upper);
        assert_eq!(CaseMode::from_signed(-3), CaseMode::Lower);
        assert_eq!(CaseMode::from_signed(0), CaseMode::Preserve);
    }

    #[test]
    fn test_case_mode_apply() {
        assert_eq!(CaseMode::Upper.apply("Über"), "ÜBER");
        assert_eq!(CaseMode::Lower.apply("Über"), "über");
        assert_eq!(CaseMode::Preserve.apply("Über"), "Über");
    }

    #[test]
    fn test_sort_direction_from_str() {
        assert_eq!(
            SortDirection::from_str("asc").unwrap(),
            SortDirection::Ascending
        );
        assert_eq!(
            SortDirection::from_str("Descending").unwrap(),
            SortDirection::Descending
        );
        assert_eq!(SortDirection::from_str("none").unwrap(), SortDirection::None);
        assert_eq!(SortDirection::from_str("-42").unwrap(), SortDirection::Descending);
        assert!(SortDirection::from_str("sideways").is_err());
    }

    #[test]
    fn test_sort_spec_default_is_unsorted() {
        let spec = SortSpec::default();
        assert!(spec.is_unsorted());
        assert!(!SortSpec::most_frequent().is_unsorted());
    }

    #[test]
    fn test_deserialize_signed_and_named() {
        let spec: SortSpec =
            serde_json::from_str(r#"{"by_token": -1, "by_frequency": "asc"}"#).unwrap();
        assert_eq!(spec.by_token, SortDirection::Descending);
        assert_eq!(spec.by_frequency, SortDirection::Ascending);

        let case: CaseMode = serde_json::from_str("5").unwrap();
        assert_eq!(case, CaseMode::Upper);
        let case: CaseMode = serde_json::from_str(r#""lower""#).unwrap();
        assert_eq!(case, CaseMode::Lower);
    }

    #[test]
    fn test_serialize_as_names() {
        let json = serde_json::to_string(&SortSpec::most_frequent()).unwrap();
        assert_eq!(json, r#"{"by_token":"none","by_frequency":"desc"}"#);
    }
}
