//! Table-ready frequency data.
//!
//! The data flow is:
//! 1. Token multiset (accumulated and filtered)
//! 2. FrequencyTable (counted and sorted)
//! 3. FrequencyView (formatted strings for display)
//!
//! FrequencyView only formats; it never reorders or filters beyond taking
//! the first N rows of an already sorted table.

use serde::{Deserialize, Serialize};

use crate::query::{FrequencyTable, SortDirection, SortSpec};

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (the token, or "Total (N unique)")
    pub label: String,
    /// Count and share, ready for display
    pub values: Vec<String>,
}

/// Table-ready frequency data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyView {
    /// Optional title describing the ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column headers: [Token, Count, Share]
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<TableRow>,
    /// Totals over the whole table, shown rows or not
    pub footer: TableRow,
    /// Note shown when rows were cut off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
}

impl FrequencyView {
    /// Format `table`, keeping at most `top` rows.
    pub fn from_table(table: &FrequencyTable, top: Option<usize>) -> Self {
        let total = table.total();
        let shown = top.map_or(table.len(), |n| n.min(table.len()));

        let rows = table
            .iter()
            .take(shown)
            .map(|entry| TableRow {
                label: entry.token.clone(),
                values: vec![entry.count.to_string(), share(entry.count, total)],
            })
            .collect();

        let footer = TableRow {
            label: format!("Total ({} unique)", table.len()),
            values: vec![total.to_string(), share(total, total)],
        };

        let legend = (shown < table.len())
            .then(|| format!("Showing top {} of {} tokens", shown, table.len()));

        FrequencyView {
            title: None,
            headers: vec!["Token".into(), "Count".into(), "Share".into()],
            rows,
            footer,
            legend,
        }
    }

    /// Title the view after the sort that produced the table.
    pub fn with_sort_title(mut self, sort: &SortSpec) -> Self {
        self.title = describe_sort(sort);
        self
    }
}

fn share(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

fn direction_word(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Descending => "descending",
        _ => "ascending",
    }
}

fn describe_sort(sort: &SortSpec) -> Option<String> {
    match (sort.by_frequency, sort.by_token) {
        (SortDirection::None, SortDirection::None) => None,
        (SortDirection::None, token) => {
            Some(format!("By token ({})", direction_word(token)))
        }
        (frequency, token) => Some(format!(
            "By frequency ({}), then token ({})",
            direction_word(frequency),
            direction_word(token)
        )),
    }
}
