//! The generic table renderer.
//!
//! [`Table`] holds a column specification and renders any slice of rows into
//! a [`RenderedTable`]: one header cell per column and one body row per
//! record, each with one cell per column, all in input order. Nothing is
//! cached between renders.
//!
//! # Example
//!
//! ```rust
//! use deskview_render::table::{variants, Column, Table};
//! use serde_json::json;
//!
//! let table = Table::new(vec![
//!     Column::key("sectorName")
//!         .header("Sector Name")
//!         .cell(|ctx| variants::title(ctx.to_node())),
//!     Column::key("sectorId")
//!         .cell(|ctx| variants::link(format!("/offices/1/{}", ctx.text()), "Access sector")),
//! ]);
//!
//! let rows = vec![
//!     json!({ "sectorId": 10, "sectorName": "North Wing" }),
//!     json!({ "sectorId": 11, "sectorName": "South Wing" }),
//! ];
//!
//! let rendered = table.render(&rows);
//! assert_eq!(rendered.header_labels(), vec!["Sector Name", ""]);
//! assert_eq!(rendered.rows.len(), 2);
//!
//! let html = rendered.into_node().to_string();
//! assert!(html.contains(r#"<a class="link" href="/offices/1/11">"#));
//! ```

use serde::Serialize;

use super::types::{serialize_for_keys, Column, HeaderFallback, TableClasses};
use crate::node::{Element, Node};

/// A column specification ready to render rows of type `R`.
pub struct Table<R> {
    columns: Vec<Column<R>>,
    header_fallback: HeaderFallback,
    classes: TableClasses,
}

impl<R> Table<R> {
    /// Creates a table from an ordered column specification.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Table {
            columns,
            header_fallback: HeaderFallback::default(),
            classes: TableClasses::default(),
        }
    }

    /// Appends a column.
    pub fn column(mut self, column: Column<R>) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets what unlabeled columns show in the header.
    pub fn header_fallback(mut self, fallback: HeaderFallback) -> Self {
        self.header_fallback = fallback;
        self
    }

    /// Sets the CSS classes.
    pub fn classes(mut self, classes: TableClasses) -> Self {
        self.classes = classes;
        self
    }

    /// The column specification.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The header cells, in column order.
    pub fn header_row(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|col| {
                let label = match (col.header_label(), self.header_fallback) {
                    (Some(label), _) => Some(label.to_string()),
                    (None, HeaderFallback::ColumnId) => Some(col.id().to_string()),
                    (None, HeaderFallback::Blank) => None,
                };
                HeaderCell {
                    key: col.id().to_string(),
                    label,
                }
            })
            .collect()
    }

    /// Renders one body row.
    pub fn row(&self, row_index: usize, record: &R) -> RenderedRow {
        let key = row_index.to_string();
        let serialized = serialize_for_keys(&self.columns, record);
        let cells = self
            .columns
            .iter()
            .map(|col| RenderedCell {
                key: format!("{}_{}", key, col.id()),
                content: col.render_cell_in(record, serialized.as_ref(), row_index),
            })
            .collect();
        RenderedRow { key, cells }
    }

    /// Renders the header and one body row per record.
    pub fn render(&self, rows: &[R]) -> RenderedTable {
        let rendered = RenderedTable {
            header: self.header_row(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, record)| self.row(i, record))
                .collect(),
            classes: self.classes.clone(),
        };
        tracing::trace!(
            columns = rendered.header.len(),
            rows = rendered.rows.len(),
            "rendered table"
        );
        rendered
    }

    /// Renders straight to a node tree.
    pub fn render_node(&self, rows: &[R]) -> Node {
        self.render(rows).into_node()
    }
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Table {
            columns: self.columns.clone(),
            header_fallback: self.header_fallback,
            classes: self.classes.clone(),
        }
    }
}

impl<R> std::fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("header_fallback", &self.header_fallback)
            .finish()
    }
}

/// A header cell. `label` is `None` for a blank header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    /// Stable key (the column id).
    pub key: String,
    /// The label, if any.
    pub label: Option<String>,
}

/// A rendered body row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    /// Stable key (the row index).
    pub key: String,
    /// One cell per column, in column order.
    pub cells: Vec<RenderedCell>,
}

/// A rendered body cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    /// Stable key, `"{row}_{column}"`.
    pub key: String,
    /// The cell content.
    pub content: Node,
}

/// The result of rendering a table: a header section and a body section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    /// Header cells, in column order.
    pub header: Vec<HeaderCell>,
    /// Body rows, in input order.
    pub rows: Vec<RenderedRow>,
    #[serde(skip)]
    classes: TableClasses,
}

impl RenderedTable {
    /// Header labels as text, blank headers as empty strings.
    pub fn header_labels(&self) -> Vec<String> {
        self.header
            .iter()
            .map(|h| h.label.clone().unwrap_or_default())
            .collect()
    }

    /// Body cells flattened to text.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.content.text_content()).collect())
            .collect()
    }

    /// Builds the node tree without consuming the table.
    pub fn to_node(&self) -> Node {
        self.clone().into_node()
    }

    /// Converts into the node tree.
    pub fn into_node(self) -> Node {
        let classes = self.classes;

        let header_row = Element::new("tr").key("header").children(self.header.into_iter().map(
            |h| {
                Element::new("th")
                    .key(h.key)
                    .class(classes.header_cell.as_str())
                    .child(h.label)
            },
        ));

        let body_rows = self.rows.into_iter().map(|row| {
            Element::new("tr")
                .key(row.key)
                .class(classes.row.as_str())
                .children(row.cells.into_iter().map(|cell| {
                    Element::new("td")
                        .key(cell.key)
                        .class(classes.cell.as_str())
                        .child(cell.content)
                }))
        });

        let table = Element::new("table")
            .class(classes.table.as_str())
            .child(
                Element::new("thead")
                    .class(classes.header.as_str())
                    .child(header_row),
            )
            .child(
                Element::new("tbody")
                    .class(classes.body.as_str())
                    .children(body_rows),
            );

        Element::new("div")
            .class(classes.wrapper.as_str())
            .child(table)
            .into()
    }
}

impl From<RenderedTable> for Node {
    fn from(table: RenderedTable) -> Self {
        table.into_node()
    }
}
