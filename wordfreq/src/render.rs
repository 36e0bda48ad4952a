//! Table and JSON rendering for CLI output.

use console::{measure_text_width, Style};
use serde::Serialize;
use wordfreqlib::{FrequencyEntry, FrequencyTable, FrequencyView, TableRow, Warning};

/// Widest token column before names are truncated
const MAX_NAME_WIDTH: usize = 40;
const CELL_WIDTH: usize = 10;

/// JSON report: ordered entries plus totals and warnings.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub entries: &'a [FrequencyEntry],
    pub total: u64,
    pub unique: usize,
    pub warnings: &'a [Warning],
}

impl<'a> JsonReport<'a> {
    pub fn new(table: &'a FrequencyTable, shown: usize, warnings: &'a [Warning]) -> Self {
        Self {
            entries: &table.entries()[..shown.min(table.len())],
            total: table.total(),
            unique: table.len(),
            warnings,
        }
    }
}

/// Truncate a name to fit within max_len, adding ".." if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    if measure_text_width(name) <= max_len {
        return name.to_string();
    }
    let kept: String = name.chars().take(max_len.saturating_sub(2)).collect();
    format!("{}..", kept)
}

fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn format_row(row: &TableRow, name_width: usize) -> String {
    let mut line = pad_right(&truncate_name(&row.label, name_width), name_width);
    for value in &row.values {
        line.push_str(&format!("{:>width$}", value, width = CELL_WIDTH));
    }
    line
}

/// Render a frequency view as a plain-text table.
pub fn render_table(view: &FrequencyView) -> String {
    let header_style = Style::new().bold();
    let footer_style = Style::new().bold();
    let dim = Style::new().dim();

    let name_width = view
        .rows
        .iter()
        .map(|row| measure_text_width(&row.label))
        .chain([
            measure_text_width(&view.footer.label),
            view.headers.first().map_or(0, |h| measure_text_width(h)),
        ])
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH)
        + 2;
    let separator = "-".repeat(name_width + CELL_WIDTH * view.headers.len().saturating_sub(1));

    let mut out = String::new();
    if let Some(title) = &view.title {
        out.push_str(&format!("{}\n", dim.apply_to(title)));
    }

    let header = TableRow {
        label: view.headers.first().cloned().unwrap_or_default(),
        values: view.headers.iter().skip(1).cloned().collect(),
    };
    out.push_str(&format!("{}\n", header_style.apply_to(format_row(&header, name_width))));
    out.push_str(&format!("{}\n", separator));
    for row in &view.rows {
        out.push_str(&format_row(row, name_width));
        out.push('\n');
    }
    out.push_str(&format!("{}\n", separator));
    out.push_str(&format!(
        "{}\n",
        footer_style.apply_to(format_row(&view.footer, name_width))
    ));
    if let Some(legend) = &view.legend {
        out.push_str(&format!("{}\n", dim.apply_to(legend)));
    }
    out
}

/// Render warnings for stderr.
pub fn render_warnings(warnings: &[Warning]) -> String {
    let style = Style::new().yellow();
    warnings
        .iter()
        .map(|w| format!("{} {}\n", style.apply_to("warning:"), w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("averyveryverylongtoken", 10), "averyver..");
    }

    #[test]
    fn test_render_table_layout() {
        console::set_colors_enabled(false);
        let table = FrequencyTable::count_tokens(["a", "bb", "a"]);
        let view = FrequencyView::from_table(&table, None);
        let out = render_table(&view);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("Token"));
        assert!(lines[0].ends_with("Share"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("a "));
        assert!(lines[2].contains("66.7%"));
        assert!(lines[5].starts_with("Total (2 unique)"));
    }

    #[test]
    fn test_json_report_truncates_entries() {
        let table = FrequencyTable::count_tokens(["a", "b", "a"]);
        let report = JsonReport::new(&table, 1, &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"].as_array().unwrap().len(), 1);
        assert_eq!(json["total"], 3);
        assert_eq!(json["unique"], 2);
    }
}
