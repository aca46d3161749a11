//! Turns result documents into ordered raw split rows.
//!
//! HTML-ish documents are tried against a list of strategies in order and the
//! first one that yields rows wins. CSV exports have their own reader. Nothing
//! here fails: a document nobody can read produces no rows.

mod csv;
mod html;
mod json;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use csv::{extract_csv_rows, split_csv_line};
pub use html::{extract_html_table_rows, extract_markdown_rows, strip_markup};
pub use json::extract_embedded_json_rows;

/// One split line from a result table, exactly as found in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    /// Split name with markup removed, case preserved.
    pub label: String,
    /// Wall-clock timestamp of the split, unused downstream.
    pub time_of_day: Option<String>,
    /// Elapsed race time at this split.
    pub cumulative_time: String,
    /// Stated duration of this split; may be empty or zero.
    pub diff: String,
}

impl RawRow {
    pub fn new(
        label: impl Into<String>,
        time_of_day: Option<&str>,
        cumulative_time: impl Into<String>,
        diff: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            time_of_day: time_of_day.map(str::to_string),
            cumulative_time: cumulative_time.into(),
            diff: diff.into(),
        }
    }
}

/// The kind of document being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Html,
    Csv,
}

impl SourceKind {
    /// Guesses the kind from a file extension, defaulting to HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Html,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown source kind: {other}")),
        }
    }
}

/// A way of finding split rows inside an HTML-ish document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// The first `<table>` element.
    HtmlTable,
    /// Pipe-delimited rows with a `HH:MM:SS` time-of-day column.
    MarkdownTable,
    /// Split objects inside a `window.__INITIAL_STATE__` assignment.
    EmbeddedJson,
}

impl Strategy {
    fn extract(self, source: &str) -> Vec<RawRow> {
        match self {
            Self::HtmlTable => extract_html_table_rows(source),
            Self::MarkdownTable => extract_markdown_rows(source),
            Self::EmbeddedJson => extract_embedded_json_rows(source),
        }
    }
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Strategies tried in order for HTML sources.
    pub strategies: Vec<Strategy>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strategies: vec![
                Strategy::HtmlTable,
                Strategy::MarkdownTable,
                Strategy::EmbeddedJson,
            ],
        }
    }
}

/// Extracts rows with the default strategy order.
pub fn extract_raw_rows(source: &str, kind: SourceKind) -> Vec<RawRow> {
    extract_with(source, kind, &ExtractOptions::default())
}

/// Extracts rows using explicit options.
pub fn extract_with(source: &str, kind: SourceKind, options: &ExtractOptions) -> Vec<RawRow> {
    match kind {
        SourceKind::Csv => extract_csv_rows(source),
        SourceKind::Html => {
            for strategy in &options.strategies {
                let rows = strategy.extract(source);
                if !rows.is_empty() {
                    tracing::debug!(?strategy, rows = rows.len(), "extracted split rows");
                    return rows;
                }
                tracing::debug!(?strategy, "strategy found no rows");
            }
            Vec::new()
        }
    }
}
