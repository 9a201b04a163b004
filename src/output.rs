//! Output formatting for answers.
//!
//! Renders an `Answer` either as a human-readable text table or as a JSON
//! document for scripting.

use serde::Serialize;

use crate::db::QueryResult;
use crate::error::IntelliSqlError;
use crate::pipeline::Answer;

/// Message shown when the question is empty or whitespace.
pub const EMPTY_QUESTION_WARNING: &str = "Please enter a question.";

/// Output format for answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Generated SQL followed by an aligned table.
    #[default]
    Text,
    /// A single JSON document per answer.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid output format: {s}. Expected: text or json"
            )),
        }
    }
}

/// JSON output structure.
#[derive(Debug, Serialize)]
struct JsonAnswer<'a> {
    sql: &'a str,
    columns: Vec<&'a str>,
    rows: Vec<Vec<serde_json::Value>>,
    row_count: usize,
    execution_time_ms: u64,
}

/// Formats an answer according to `format`.
pub fn format_answer(answer: &Answer, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "Generated SQL Query: {}\n\nThe Result is:\n{}",
            answer.sql,
            format_table(&answer.result)
        ),
        OutputFormat::Json => format_json(answer),
    }
}

/// Formats an error the way it is shown inline to the user.
pub fn format_error(error: &IntelliSqlError) -> String {
    format!("An error occurred: {}", error)
}

fn format_json(answer: &Answer) -> String {
    let output = JsonAnswer {
        sql: &answer.sql,
        columns: answer.result.column_names(),
        rows: answer
            .result
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_json()).collect())
            .collect(),
        row_count: answer.result.row_count,
        execution_time_ms: answer.result.execution_time.as_millis() as u64,
    };

    serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}", e))
}

/// Renders a result set as an aligned text table with a row count footer.
///
/// Widths are measured in characters so non-ASCII names stay aligned.
pub fn format_table(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return "(no columns returned)\n".to_string();
    }

    let headers = result.column_names();
    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_display_string()).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(headers.iter().copied(), &widths));
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');

    for row in &cells {
        out.push_str(&format_line(row.iter().map(String::as_str), &widths));
    }

    let noun = if result.row_count == 1 { "row" } else { "rows" };
    out.push_str(&format!("({} {})\n", result.row_count, noun));
    out
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", line.trim_end())
}
