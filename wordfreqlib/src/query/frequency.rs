//! Frequency aggregation and sorting.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::collation::Collator;
use super::options::{SortDirection, SortSpec};

/// One unique token and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: u64,
}

/// Unique tokens with their counts, in table order.
///
/// Counting keeps first-occurrence order; [`FrequencyTable::sort`] reorders.
/// Serializes as a JSON object in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every token; identity is exact, case-sensitive text.
    pub fn count_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<FrequencyEntry> = Vec::new();

        for token in tokens {
            let token = token.as_ref();
            match index.get(token) {
                Some(&i) => entries[i].count += 1,
                None => {
                    index.insert(token.to_string(), entries.len());
                    entries.push(FrequencyEntry {
                        token: token.to_string(),
                        count: 1,
                    });
                }
            }
        }

        Self { entries }
    }

    /// Count of `token`, if present.
    pub fn get(&self, token: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.token == token)
            .map(|entry| entry.count)
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }

    /// Tokens in table order.
    pub fn tokens(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.token.as_str()).collect()
    }

    /// Token to count, ignoring order.
    pub fn counts(&self) -> HashMap<&str, u64> {
        self.entries
            .iter()
            .map(|e| (e.token.as_str(), e.count))
            .collect()
    }

    /// Number of unique tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Keep only the first `n` entries.
    pub fn truncate(&mut self, n: usize) {
        self.entries.truncate(n);
    }

    /// Reorder the table.
    ///
    /// With a frequency direction, count is the primary key and the token
    /// breaks ties (ascending unless the token direction is descending).
    /// Otherwise only the token direction applies; with neither, the table
    /// keeps its current order. The sort is stable.
    pub fn sort(&mut self, spec: &SortSpec, collator: &Collator) {
        if spec.is_unsorted() {
            return;
        }

        let mut keyed: Vec<_> = self
            .entries
            .drain(..)
            .map(|entry| (collator.key(&entry.token), entry))
            .collect();

        keyed.sort_by(|(key_a, a), (key_b, b)| {
            let by_token = |direction: SortDirection| match direction {
                SortDirection::Descending => key_b.cmp(key_a),
                _ => key_a.cmp(key_b),
            };
            match spec.by_frequency {
                SortDirection::Ascending => a
                    .count
                    .cmp(&b.count)
                    .then_with(|| by_token(spec.by_token)),
                SortDirection::Descending => b
                    .count
                    .cmp(&a.count)
                    .then_with(|| by_token(spec.by_token)),
                SortDirection::None => match spec.by_token {
                    SortDirection::None => Ordering::Equal,
                    direction => by_token(direction),
                },
            }
        });

        self.entries = keyed.into_iter().map(|(_, entry)| entry).collect();
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyEntry;
    type IntoIter = std::slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.token, &entry.count)?;
        }
        map.end()
    }
}
