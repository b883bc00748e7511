//! Result rendering for the command line.
//!
//! Provides two formats: aligned text tables with a statistics line, and
//! JSON documents for scripting.

use crate::catalog::{CatalogEntry, UseCase, Variant};
use crate::db::{ColumnInfo, ResultStats, Row};
use crate::query::QueryOutcome;
use serde::{Deserialize, Serialize};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// JSON output structure for one result.
#[derive(Debug, Serialize)]
struct JsonResult<'a> {
    columns: &'a [ColumnInfo],
    rows: &'a [Row],
    stats: JsonStats,
}

#[derive(Debug, Serialize)]
struct JsonStats {
    #[serde(flatten)]
    stats: ResultStats,
    execution_time_ms: f64,
}

/// Formats query results and catalog entries.
pub struct Renderer {
    format: OutputFormat,
    max_rows: usize,
}

impl Renderer {
    /// Creates a renderer. `max_rows` bounds the rows the text format prints.
    pub fn new(format: OutputFormat, max_rows: usize) -> Self {
        Self { format, max_rows }
    }

    /// Formats a successful query outcome.
    pub fn result(&self, outcome: &QueryOutcome) -> String {
        match self.format {
            OutputFormat::Text => self.result_text(outcome),
            OutputFormat::Json => Self::result_json(outcome),
        }
    }

    fn result_text(&self, outcome: &QueryOutcome) -> String {
        let result = &outcome.result;
        if result.columns.is_empty() {
            return format!("(no rows)\n{}\n", Self::stats_line(outcome));
        }

        let shown = &result.rows[..result.rows.len().min(self.max_rows)];
        let cells: Vec<Vec<String>> = shown
            .iter()
            .map(|row| row.iter().map(|v| v.to_display_string()).collect())
            .collect();

        let mut widths: Vec<usize> = result
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header: Vec<&str> = result.columns.iter().map(|c| c.name.as_str()).collect();
        out.push_str(&format_line(&header, &widths));
        out.push_str(&separator(&widths));
        for row in &cells {
            let row: Vec<&str> = row.iter().map(String::as_str).collect();
            out.push_str(&format_line(&row, &widths));
        }

        let hidden = result.rows.len() - shown.len();
        if hidden > 0 {
            out.push_str(&format!("... {} more rows not shown\n", hidden));
        }
        out.push_str(&Self::stats_line(outcome));
        out.push('\n');
        out
    }

    fn stats_line(outcome: &QueryOutcome) -> String {
        format!(
            "{} | Time: {:.2}ms",
            outcome.stats,
            outcome.execution_time.as_secs_f64() * 1000.0
        )
    }

    fn result_json(outcome: &QueryOutcome) -> String {
        let json = JsonResult {
            columns: &outcome.result.columns,
            rows: &outcome.result.rows,
            stats: JsonStats {
                stats: outcome.stats,
                execution_time_ms: outcome.execution_time.as_secs_f64() * 1000.0,
            },
        };

        serde_json::to_string_pretty(&json)
            .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}", e))
    }

    /// Formats a list of catalog entries.
    pub fn catalog(&self, entries: &[&CatalogEntry]) -> String {
        match self.format {
            OutputFormat::Text => {
                let width = entries.iter().map(|e| e.id.len()).max().unwrap_or(0);
                entries
                    .iter()
                    .map(|e| {
                        let marker = match e.variant {
                            Variant::Example => String::new(),
                            other => format!(" [{}]", other),
                        };
                        format!("{:<width$}  {}{}\n", e.id, e.title, marker, width = width)
                    })
                    .collect()
            }
            OutputFormat::Json => serde_json::to_string_pretty(entries)
                .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}", e)),
        }
    }

    /// Formats the use-case guide as a table of task, function and example.
    pub fn use_cases(&self, use_cases: &[UseCase]) -> String {
        match self.format {
            OutputFormat::Text => {
                let headers = ["Use Case", "Function", "Example"];
                let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
                for u in use_cases {
                    for (width, cell) in widths.iter_mut().zip([u.task, u.function, u.example]) {
                        *width = (*width).max(cell.len());
                    }
                }

                let mut out = format_line(&headers, &widths);
                out.push_str(&separator(&widths));
                for u in use_cases {
                    out.push_str(&format_line(&[u.task, u.function, u.example], &widths));
                }
                out
            }
            OutputFormat::Json => serde_json::to_string_pretty(use_cases)
                .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}", e)),
        }
    }

    /// Formats one entry with its SQL text.
    pub fn entry(&self, entry: &CatalogEntry) -> String {
        match self.format {
            OutputFormat::Text => format!(
                "-- {} ({}, {})\n{}\n",
                entry.title, entry.category, entry.variant, entry.sql
            ),
            OutputFormat::Json => serde_json::to_string_pretty(entry)
                .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}", e)),
        }
    }
}

fn separator(widths: &[usize]) -> String {
    let line = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    format!("{}\n", line)
}

fn format_line(cells: &[&str], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", line.trim_end())
}
