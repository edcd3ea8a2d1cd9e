//! Output formats for render trees and tables.
//!
//! | Mode | Node | Table |
//! |------|------|-------|
//! | `html` | HTML markup | HTML markup |
//! | `json` / `yaml` | Serialized render tree | Serialized render tree |
//! | `text` | Text content | Aligned plain-text columns |
//! | `csv` | unsupported | Header + cell text |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::error::RenderError;
use crate::html::to_html;
use crate::node::Node;
use crate::table::RenderedTable;

/// Column separator for [`OutputMode::Text`].
const TEXT_SEPARATOR: &str = "  ";

/// How output is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// HTML markup.
    #[default]
    Html,
    /// The render tree as JSON.
    Json,
    /// The render tree as YAML.
    Yaml,
    /// Cell text as CSV.
    Csv,
    /// Plain text.
    Text,
}

impl OutputMode {
    /// Returns true for modes that flatten tables to cell text.
    pub fn is_tabular(&self) -> bool {
        matches!(self, OutputMode::Csv | OutputMode::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Html => "html",
            OutputMode::Json => "json",
            OutputMode::Yaml => "yaml",
            OutputMode::Csv => "csv",
            OutputMode::Text => "text",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputMode::Html),
            "json" => Ok(OutputMode::Json),
            "yaml" | "yml" => Ok(OutputMode::Yaml),
            "csv" => Ok(OutputMode::Csv),
            "text" | "txt" => Ok(OutputMode::Text),
            other => Err(format!(
                "unknown output mode '{}', expected html, json, yaml, csv or text",
                other
            )),
        }
    }
}

/// Writes a node tree in the given mode.
pub fn write_node(node: &Node, mode: OutputMode) -> Result<String, RenderError> {
    match mode {
        OutputMode::Html => Ok(to_html(node)),
        OutputMode::Json => Ok(serde_json::to_string_pretty(node)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(node)?),
        OutputMode::Text => Ok(node.text_content()),
        OutputMode::Csv => Err(RenderError::Unsupported(mode.to_string())),
    }
}

/// Writes a rendered table in the given mode.
pub fn write_table(table: &RenderedTable, mode: OutputMode) -> Result<String, RenderError> {
    if !mode.is_tabular() {
        return write_node(&table.to_node(), mode);
    }
    match mode {
        OutputMode::Csv => to_csv(table),
        _ => Ok(to_text(table)),
    }
}

/// Header labels and cell text as CSV.
pub fn to_csv(table: &RenderedTable) -> Result<String, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.header_labels())?;
    for row in table.text_rows() {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Header labels and cell text aligned in columns.
///
/// Widths are measured in display columns, so wide characters line up.
/// Line breaks inside a cell are replaced by spaces. Trailing padding is
/// trimmed from every line.
pub fn to_text(table: &RenderedTable) -> String {
    let header = table.header_labels();
    let rows: Vec<Vec<String>> = table
        .text_rows()
        .into_iter()
        .map(|row| row.into_iter().map(|c| c.replace('\n', " ")).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    for line in std::iter::once(&header).chain(rows.iter()) {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| pad_right(cell, width))
            .collect();
        out.push_str(cells.join(TEXT_SEPARATOR).trim_end());
        out.push('\n');
    }
    out
}

/// Pads to `width` display columns.
fn pad_right(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - current))
}
