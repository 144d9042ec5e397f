//! Output formatters for the final result set.
//!
//! Renders a `ResultTable` as a psql-style table, CSV, or JSON, for printing
//! to stdout or writing to a file.

use crate::db::{ResultTable, Value};
use crate::error::{PipeError, Result};
use std::path::Path;

/// Output format for the final result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawing table with a row-count trailer.
    #[default]
    Table,
    /// Comma-separated values with a header row.
    Csv,
    /// JSON object with column names and row arrays.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid output format: {s}. Expected: table, csv, or json"
            )),
        }
    }
}

/// Renders a result table in the requested format.
pub fn render(table: &ResultTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(table)),
        OutputFormat::Csv => Ok(render_csv(table)),
        OutputFormat::Json => render_json(table),
    }
}

/// Writes rendered output to a file.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .map_err(|e| PipeError::export(format!("Failed to write {}: {e}", path.display())))
}

/// Renders a psql-style box-drawing table.
fn render_table(table: &ResultTable) -> String {
    let headers: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();

    // Precompute cell strings once; widths come from headers and cells.
    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    let mut string_rows: Vec<Vec<String>> = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut srow: Vec<String> = Vec::with_capacity(headers.len());
        for (i, value) in row.iter().enumerate() {
            let cell = value.to_display_string();
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.len());
            }
            srow.push(cell);
        }
        string_rows.push(srow);
    }

    let mut output = String::new();
    push_border(&mut output, &col_widths, '┌', '┬', '┐');
    push_row(&mut output, &headers, &col_widths);
    push_border(&mut output, &col_widths, '├', '┼', '┤');
    for srow in &string_rows {
        let cells: Vec<&str> = srow.iter().map(String::as_str).collect();
        push_row(&mut output, &cells, &col_widths);
    }
    push_border(&mut output, &col_widths, '└', '┴', '┘');

    let row_label = if table.row_count == 1 { "row" } else { "rows" };
    output.push_str(&format!("({} {})\n", table.row_count, row_label));
    output
}

fn push_border(output: &mut String, widths: &[usize], left: char, mid: char, right: char) {
    output.push(left);
    for (idx, width) in widths.iter().enumerate() {
        output.push_str(&"─".repeat(width + 2));
        output.push(if idx == widths.len() - 1 { right } else { mid });
    }
    output.push('\n');
}

fn push_row(output: &mut String, cells: &[&str], widths: &[usize]) {
    output.push('│');
    for (i, cell) in cells.iter().enumerate() {
        output.push(' ');
        output.push_str(&format!("{:width$}", cell, width = widths[i]));
        output.push(' ');
        output.push('│');
    }
    output.push('\n');
}

/// Renders CSV with a header row. NULL renders as an empty field.
fn render_csv(table: &ResultTable) -> String {
    let mut output = table
        .columns
        .iter()
        .map(|c| csv_escape(&c.name))
        .collect::<Vec<_>>()
        .join(",");
    output.push('\n');

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|value| match value {
                Value::Null => String::new(),
                other => csv_escape(&other.to_display_string()),
            })
            .collect();
        output.push_str(&cells.join(","));
        output.push('\n');
    }

    output
}

/// Escapes a CSV field (quotes fields containing comma, quote, or newline).
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders a JSON object with column names and row arrays.
fn render_json(table: &ResultTable) -> Result<String> {
    let columns: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    let rows: Vec<Vec<serde_json::Value>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(json_value).collect())
        .collect();

    let mut rendered = serde_json::to_string_pretty(&serde_json::json!({
        "columns": columns,
        "rows": rows,
    }))
    .map_err(|e| PipeError::export(format!("Failed to serialize result: {e}")))?;
    rendered.push('\n');
    Ok(rendered)
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::from(*b),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Value::from(*f),
        Value::String(s) => serde_json::Value::from(s.as_str()),
        Value::Bytes(b) => serde_json::Value::from(format!("<{} bytes>", b.len())),
    }
}
