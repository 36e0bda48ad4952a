//! Source discovery: what text goes into the pipeline.
//!
//! This module handles the first stage of the pipeline - describing where
//! tokens come from. It provides:
//!
//! - **Source references**: literal text, nested string trees, and record
//!   providers paired with a query ([`Source`])
//! - **Untyped resolution**: turning JSON-shaped descriptions into sources,
//!   once, at ingestion ([`Source::from_value`])
//! - **Files**: file sources, list/pattern/substitution files ([`files`])
//! - **Records**: the structured-record collaborator interface ([`records`])
//!
//! ## Example
//!
//! ```rust
//! use wordfreqlib::source::{Source, SourceNode};
//!
//! let text = Source::from("This is a test string.");
//! let tree = Source::tree(vec![
//!     SourceNode::from("This is a test string."),
//!     SourceNode::branch(vec![SourceNode::from("This is a second test string")]),
//! ]);
//! assert_eq!(tree.leaves().len(), 2);
//! # let _ = text;
//! ```

pub mod files;
pub mod records;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::WordFreqError;
use crate::Result;

pub use files::{expand_file_sources, read_source_lines, AssetResolver, OrderedPairs};
pub use records::{MemoryRecordStore, ProviderRegistry, Record, RecordProvider, RecordQuery};

/// One element of a nested string tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    /// A string to tokenize
    Leaf(String),
    /// A nested list of nodes
    Branch(Vec<SourceNode>),
}

impl SourceNode {
    pub fn branch(nodes: Vec<SourceNode>) -> Self {
        SourceNode::Branch(nodes)
    }

    /// Collect leaves depth-first, left to right.
    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            SourceNode::Leaf(text) => out.push(text),
            SourceNode::Branch(nodes) => {
                for node in nodes {
                    node.collect_leaves(out);
                }
            }
        }
    }
}

impl From<&str> for SourceNode {
    fn from(text: &str) -> Self {
        SourceNode::Leaf(text.to_string())
    }
}

impl From<String> for SourceNode {
    fn from(text: String) -> Self {
        SourceNode::Leaf(text)
    }
}

/// A record provider together with the query to run against it.
#[derive(Clone)]
pub struct RecordSource {
    pub provider: Arc<dyn RecordProvider>,
    pub query: RecordQuery,
}

impl fmt::Debug for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSource")
            .field("provider", &self.provider.name())
            .field("query", &self.query)
            .finish()
    }
}

/// A source reference: exactly one interpretation per element.
#[derive(Debug, Clone)]
pub enum Source {
    /// Literal text
    Text(String),
    /// Nested string tree, flattened depth-first
    Tree(Vec<SourceNode>),
    /// Values of the queried fields of every returned record
    Records(RecordSource),
}

impl Source {
    pub fn text(text: impl Into<String>) -> Self {
        Source::Text(text.into())
    }

    pub fn tree(nodes: Vec<SourceNode>) -> Self {
        Source::Tree(nodes)
    }

    pub fn records(provider: Arc<dyn RecordProvider>, query: RecordQuery) -> Self {
        Source::Records(RecordSource { provider, query })
    }

    /// Leaf strings of a text or tree source, in traversal order.
    /// Record sources have no static leaves.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        match self {
            Source::Text(text) => out.push(text.as_str()),
            Source::Tree(nodes) => {
                for node in nodes {
                    node.collect_leaves(&mut out);
                }
            }
            Source::Records(_) => {}
        }
        out
    }

    /// Resolve a JSON-shaped source description.
    ///
    /// Resolution order:
    /// 1. a string is literal text;
    /// 2. an array whose first element is an array is a string tree;
    /// 3. an array `[{"provider": name}, query]` is a record source, where
    ///    `name` must be registered in `registry`;
    /// 4. anything else is an [`WordFreqError::InvalidSourceKind`].
    ///
    /// `index` is the element position, used in error messages.
    pub fn from_value(index: usize, value: &Value, registry: &ProviderRegistry) -> Result<Self> {
        let invalid = |reason: String| WordFreqError::InvalidSourceKind { index, reason };

        match value {
            Value::String(text) => Ok(Source::Text(text.clone())),
            Value::Array(items) => match items.first() {
                Some(Value::Array(_)) => items
                    .iter()
                    .map(|item| node_from_value(item).map_err(&invalid))
                    .collect::<Result<Vec<_>>>()
                    .map(Source::Tree),
                Some(Value::Object(handle)) => {
                    let name = handle
                        .get("provider")
                        .and_then(Value::as_str)
                        .ok_or_else(|| invalid("record handle must name a \"provider\"".into()))?;
                    let provider = registry
                        .get(name)
                        .ok_or_else(|| invalid(format!("unknown record provider '{}'", name)))?;
                    if items.len() != 2 {
                        return Err(invalid(
                            "record source must be a [provider, query] pair".into(),
                        ));
                    }
                    let query: RecordQuery = serde_json::from_value(items[1].clone())
                        .map_err(|e| invalid(format!("invalid record query: {}", e)))?;
                    Ok(Source::records(provider, query))
                }
                Some(other) => Err(invalid(format!(
                    "array sources must start with a nested array or a record provider, found {}",
                    kind_name(other)
                ))),
                None => Err(invalid("empty array".into())),
            },
            other => Err(invalid(format!(
                "expected a string or an array, found {}",
                kind_name(other)
            ))),
        }
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

fn node_from_value(value: &Value) -> std::result::Result<SourceNode, String> {
    match value {
        Value::String(text) => Ok(SourceNode::Leaf(text.clone())),
        Value::Number(n) => Ok(SourceNode::Leaf(n.to_string())),
        Value::Array(items) => items
            .iter()
            .map(node_from_value)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(SourceNode::Branch),
        other => Err(format!(
            "string trees may only contain strings, numbers and arrays, found {}",
            kind_name(other)
        )),
    }
}

/// JSON kind name for messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ProviderRegistry {
        ProviderRegistry::new().with(Arc::new(
            MemoryRecordStore::new("testdata").record(Record::new().with("col1", "x")),
        ))
    }

    #[test]
    fn test_tree_leaves_depth_first() {
        let source = Source::tree(vec![
            SourceNode::from("a"),
            SourceNode::branch(vec![
                SourceNode::from("b"),
                SourceNode::branch(vec![SourceNode::from("c")]),
            ]),
            SourceNode::from("d"),
        ]);
        assert_eq!(source.leaves(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_from_value_string() {
        let source = Source::from_value(0, &json!("hello world"), &registry()).unwrap();
        assert!(matches!(source, Source::Text(ref t) if t == "hello world"));
    }

    #[test]
    fn test_from_value_tree() {
        let value = json!([["This is a test string."], ["This is", ["a second", [7]]]]);
        let source = Source::from_value(0, &value, &registry()).unwrap();
        assert_eq!(
            source.leaves(),
            vec!["This is a test string.", "This is", "a second", "7"]
        );
    }

    #[test]
    fn test_from_value_record_pair() {
        let value = json!([{"provider": "testdata"}, {"select": ["col1"], "where": {"id": [1]}}]);
        let source = Source::from_value(0, &value, &registry()).unwrap();
        match source {
            Source::Records(rs) => {
                assert_eq!(rs.provider.name(), "testdata");
                assert_eq!(rs.query.select, vec!["col1"]);
            }
            other => panic!("Expected record source, got {:?}", other),
        }
    }

    #[test]
    fn test_from_value_invalid_shapes() {
        let registry = registry();
        let cases = vec![
            json!(42),
            json!(null),
            json!({"text": "x"}),
            json!([]),
            json!(["flat", "strings"]),
            json!([[true]]),
            json!([{"provider": "unknown"}, {}]),
            json!([{"provider": "testdata"}]),
            json!([{"provider": "testdata"}, {"select": "not-a-list"}]),
        ];

        for (i, value) in cases.iter().enumerate() {
            let result = Source::from_value(i, value, &registry);
            match result {
                Err(WordFreqError::InvalidSourceKind { index, .. }) => assert_eq!(index, i),
                other => panic!("Expected InvalidSourceKind for {}, got {:?}", value, other),
            }
        }
    }
}
