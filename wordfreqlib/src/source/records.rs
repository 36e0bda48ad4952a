//! Structured record sources.
//!
//! The pipeline does not query databases itself. A [`RecordProvider`] is
//! handed a [`RecordQuery`] and answers with [`Record`]s; every selected field
//! value of every record is then tokenized. [`MemoryRecordStore`] is a
//! provider over an in-memory table, loadable from JSON.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::WordFreqError;
use crate::Result;

/// A query handed to a record provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    /// Fields to extract, in order (empty = every field of each record)
    #[serde(default)]
    pub select: Vec<String>,
    /// Field membership conditions; a record must satisfy all of them
    #[serde(default, rename = "where", deserialize_with = "deserialize_conditions")]
    pub conditions: BTreeMap<String, Vec<String>>,
    /// Maximum number of records to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a field.
    pub fn select(mut self, field: impl Into<String>) -> Self {
        self.select.push(field.into());
        self
    }

    /// Select several fields.
    pub fn select_many<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Require `field` to hold one of `values`.
    pub fn where_in<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions
            .entry(field.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check the membership conditions against a record.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|(field, values)| {
            record
                .get(field)
                .is_some_and(|value| values.iter().any(|v| v == value))
        })
    }
}

/// One record: an ordered list of fields with optional (null) values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a field value (replaces an existing field of the same name).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field.into(), Some(value.into()));
        self
    }

    /// Builder: set a field to null.
    pub fn with_null(mut self, field: impl Into<String>) -> Self {
        self.set(field.into(), None);
        self
    }

    fn set(&mut self, field: String, value: Option<String>) {
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Value of a field; `None` if the field is absent or null.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Fields in record order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Non-null values of the selected fields, in selection order.
    /// An empty selection yields every non-null value in record order.
    pub fn values<'a>(&'a self, select: &'a [String]) -> Vec<&'a str> {
        if select.is_empty() {
            return self.fields.iter().filter_map(|(_, v)| v.as_deref()).collect();
        }
        select.iter().filter_map(|field| self.get(field)).collect()
    }

    /// Keep only the selected fields, in selection order.
    pub fn project(&self, select: &[String]) -> Record {
        if select.is_empty() {
            return self.clone();
        }
        let fields = select
            .iter()
            .filter_map(|field| {
                self.fields
                    .iter()
                    .find(|(name, _)| name == field)
                    .cloned()
            })
            .collect();
        Record { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Scalar JSON values become strings; null stays null.
fn scalar_to_string(value: Value) -> std::result::Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err("record fields must be scalar values".into()),
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of scalar field values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut record = Record::new();
                while let Some((field, value)) = map.next_entry::<String, Value>()? {
                    let value = scalar_to_string(value).map_err(serde::de::Error::custom)?;
                    record.set(field, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

fn deserialize_conditions<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    let mut conditions = BTreeMap::new();
    for (field, value) in raw {
        let items = match value {
            Value::Array(items) => items,
            single => vec![single],
        };
        let values = items
            .into_iter()
            .map(|v| match scalar_to_string(v) {
                Ok(Some(s)) => Ok(s),
                Ok(None) => Err("null is not a valid condition value".to_string()),
                Err(e) => Err(e),
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(serde::de::Error::custom)?;
        conditions.insert(field, values);
    }
    Ok(conditions)
}

/// A source of structured records.
pub trait RecordProvider: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Answer a query with zero or more records.
    fn fetch(&self, query: &RecordQuery) -> Result<Vec<Record>>;
}

/// An in-memory table of records.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    name: String,
    records: Vec<Record>,
}

impl MemoryRecordStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Builder: append a record.
    pub fn record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn insert(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Load a table from a JSON array of objects.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> Result<Self> {
        let name = name.into();
        let records: Vec<Record> = serde_json::from_str(json).map_err(|e| {
            WordFreqError::Provider {
                provider: name.clone(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { name, records })
    }

    /// Load a table from a JSON file.
    pub fn from_file(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| WordFreqError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(name, &json)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordProvider for MemoryRecordStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, query: &RecordQuery) -> Result<Vec<Record>> {
        let matching = self.records.iter().filter(|r| query.matches(r));
        let limited: Box<dyn Iterator<Item = &Record>> = match query.limit {
            Some(limit) => Box::new(matching.take(limit)),
            None => Box::new(matching),
        };
        Ok(limited.map(|r| r.project(&query.select)).collect())
    }
}

/// Named record providers, used to resolve untyped source descriptions.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn RecordProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register a provider under its own name.
    pub fn with(mut self, provider: Arc<dyn RecordProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn register(&mut self, provider: Arc<dyn RecordProvider>) {
        self.providers.insert(provider.name().to_string(), provider);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn RecordProvider>> {
        self.providers.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> MemoryRecordStore {
        MemoryRecordStore::new("articles")
            .record(
                Record::new()
                    .with("id", "1")
                    .with("title", "Rust in practice")
                    .with("tags", "rust systems"),
            )
            .record(
                Record::new()
                    .with("id", "2")
                    .with("title", "Tag clouds")
                    .with_null("tags"),
            )
            .record(Record::new().with("id", "3").with("title", "Third"))
    }

    #[test]
    fn test_fetch_with_conditions_and_projection() {
        let store = sample_store();
        let query = RecordQuery::new()
            .select_many(["title", "tags"])
            .where_in("id", ["1", "2"]);

        let records = store.fetch(&query).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].values(&query.select),
            vec!["Rust in practice", "rust systems"]
        );
        // Null fields yield no value
        assert_eq!(records[1].values(&query.select), vec!["Tag clouds"]);
    }

    #[test]
    fn test_fetch_limit() {
        let store = sample_store();
        let records = store.fetch(&RecordQuery::new().limit(2)).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_empty_select_returns_all_fields() {
        let store = sample_store();
        let records = store
            .fetch(&RecordQuery::new().where_in("id", ["3"]))
            .unwrap();
        assert_eq!(records[0].values(&[]), vec!["3", "Third"]);
    }

    #[test]
    fn test_store_from_json() {
        let store = MemoryRecordStore::from_json_str(
            "testdata",
            r#"[{"id": 1, "col1": "alpha beta", "col2": null}, {"id": 2, "col1": "gamma"}]"#,
        )
        .unwrap();
        assert_eq!(store.len(), 2);

        let records = store
            .fetch(&RecordQuery::new().select("col1").where_in("id", ["1"]))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("col1"), Some("alpha beta"));
    }

    #[test]
    fn test_store_from_json_rejects_nested_values() {
        let result = MemoryRecordStore::from_json_str("bad", r#"[{"id": [1, 2]}]"#);
        assert!(matches!(result, Err(WordFreqError::Provider { .. })));
    }

    #[test]
    fn test_query_from_json() {
        let query: RecordQuery =
            serde_json::from_str(r#"{"select": ["col1", "col2"], "where": {"id": [1, 2]}}"#)
                .unwrap();
        assert_eq!(query.select, vec!["col1", "col2"]);
        assert_eq!(query.conditions["id"], vec!["1", "2"]);

        let single: RecordQuery = serde_json::from_str(r#"{"where": {"id": "7"}}"#).unwrap();
        assert_eq!(single.conditions["id"], vec!["7"]);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ProviderRegistry::new().with(Arc::new(sample_store()));
        assert!(registry.get("articles").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["articles"]);
    }
}
