//! Column descriptors and table configuration.
//!
//! A [`Column`] binds three things: an accessor that pulls a value out of a
//! row, an optional header label, and a cell renderer that turns the value
//! (plus the row it came from) into a [`Node`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::extract::{extract_value, value_to_node, value_to_text};
use crate::node::Node;

/// Projects a row to the value shown in a column.
type Projection<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Where a column reads its value from.
enum Accessor<R> {
    /// A typed projection of the row.
    Project(Projection<R>),
    /// A key path into the serialized row.
    Key {
        path: String,
        serialize: fn(&R) -> serde_json::Result<Value>,
    },
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Project(project) => Accessor::Project(Arc::clone(project)),
            Accessor::Key { path, serialize } => Accessor::Key {
                path: path.clone(),
                serialize: *serialize,
            },
        }
    }
}

/// Renders a single cell.
pub type CellRenderer<R> = Arc<dyn Fn(&CellContext<'_, R>) -> Node + Send + Sync>;

/// Everything a cell renderer can see.
pub struct CellContext<'a, R> {
    /// The value resolved by the column accessor. `Null` when it did not resolve.
    pub value: &'a Value,
    /// The full row record.
    pub row: &'a R,
    /// Position of the row in the input sequence.
    pub row_index: usize,
    /// Id of the column being rendered.
    pub column_id: &'a str,
}

impl<R> CellContext<'_, R> {
    /// The resolved value.
    pub fn value(&self) -> &Value {
        self.value
    }

    /// The resolved value as display text (empty for `null`).
    pub fn text(&self) -> String {
        value_to_text(self.value)
    }

    /// The resolved value as a text node, or empty for `null`.
    pub fn to_node(&self) -> Node {
        value_to_node(self.value)
    }
}

/// A column descriptor for rows of type `R`.
///
/// ```rust
/// use deskview_render::node::Node;
/// use deskview_render::table::{variants, Column};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Sector {
///     sector_id: u32,
///     sector_name: String,
/// }
///
/// let name = Column::<Sector>::key("sector_name")
///     .header("Sector Name")
///     .cell(|ctx| variants::title(ctx.to_node()));
///
/// let access = Column::accessor("sector_id", |s: &Sector| s.sector_id)
///     .cell(|ctx| variants::link(format!("/offices/1/{}", ctx.text()), "Access sector"));
///
/// assert_eq!(name.id(), "sector_name");
/// assert_eq!(access.header_label(), None);
/// ```
pub struct Column<R> {
    id: String,
    header: Option<String>,
    accessor: Accessor<R>,
    cell: Option<CellRenderer<R>>,
}

impl<R> Column<R> {
    /// Creates a column from a typed projection.
    pub fn accessor<V, F>(id: impl Into<String>, project: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Column {
            id: id.into(),
            header: None,
            accessor: Accessor::Project(Arc::new(move |row| project(row).into())),
            cell: None,
        }
    }

    /// Creates a column that reads no value.
    ///
    /// Its cell renderer receives `null` and works from the row alone.
    pub fn display(id: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            header: None,
            accessor: Accessor::Project(Arc::new(|_| Value::Null)),
            cell: None,
        }
    }

    /// Replaces the column id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the header label.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the cell renderer.
    pub fn cell<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellContext<'_, R>) -> Node + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(render));
        self
    }

    /// The column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The header label, if one was set.
    pub fn header_label(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Resolves this column's value for a row.
    pub fn resolve(&self, row: &R) -> Value {
        let serialized = serialize_for_keys(std::slice::from_ref(self), row);
        self.resolve_in(row, serialized.as_ref())
    }

    /// Renders this column's cell for a row.
    pub fn render_cell(&self, row: &R, row_index: usize) -> Node {
        let serialized = serialize_for_keys(std::slice::from_ref(self), row);
        self.render_cell_in(row, serialized.as_ref(), row_index)
    }

    /// Resolves against a row already serialized by [`serialize_for_keys`].
    pub(crate) fn resolve_in(&self, row: &R, serialized: Option<&Value>) -> Value {
        match &self.accessor {
            Accessor::Project(project) => project(row),
            Accessor::Key { path, .. } => {
                match serialized.and_then(|data| extract_value(data, path)) {
                    Some(value) => value.clone(),
                    None => {
                        tracing::debug!(key = path.as_str(), "key path does not resolve, cell left empty");
                        Value::Null
                    }
                }
            }
        }
    }

    pub(crate) fn render_cell_in(
        &self,
        row: &R,
        serialized: Option<&Value>,
        row_index: usize,
    ) -> Node {
        let value = self.resolve_in(row, serialized);
        let ctx = CellContext {
            value: &value,
            row,
            row_index,
            column_id: &self.id,
        };
        match &self.cell {
            Some(render) => render(&ctx),
            None => ctx.to_node(),
        }
    }
}

/// Serializes a row once for all key columns in `columns`.
///
/// Returns `None` when no column reads a key path, or when the row does not
/// serialize (its key cells are then left empty).
pub(crate) fn serialize_for_keys<R>(columns: &[Column<R>], row: &R) -> Option<Value> {
    let serialize = columns.iter().find_map(|col| match &col.accessor {
        Accessor::Key { serialize, .. } => Some(*serialize),
        Accessor::Project(_) => None,
    })?;
    match serialize(row) {
        Ok(data) => Some(data),
        Err(err) => {
            tracing::debug!(error = %err, "row does not serialize, key cells left empty");
            None
        }
    }
}

impl<R: Serialize> Column<R> {
    /// Creates a column reading a dot-separated key path from the serialized row.
    ///
    /// The column id is the key path. A path that does not resolve yields
    /// `null`, which renders as an empty cell.
    pub fn key(path: impl Into<String>) -> Self {
        let path = path.into();
        Column {
            id: path.clone(),
            header: None,
            accessor: Accessor::Key {
                path,
                serialize: |row| serde_json::to_value(row),
            },
            cell: None,
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Column {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("custom_cell", &self.cell.is_some())
            .finish()
    }
}

/// What an unlabeled column shows in the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderFallback {
    /// An empty header cell.
    #[default]
    Blank,
    /// The column id (the key path for key columns).
    ColumnId,
}

/// CSS classes applied to the table structure.
///
/// Defaults match the front-end stylesheet. An empty string omits the
/// attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableClasses {
    /// The outer `div`.
    pub wrapper: String,
    /// The `table` element.
    pub table: String,
    /// The `thead` element.
    pub header: String,
    /// Each `th`.
    pub header_cell: String,
    /// The `tbody` element.
    pub body: String,
    /// Each body `tr`.
    pub row: String,
    /// Each `td`.
    pub cell: String,
}

impl Default for TableClasses {
    fn default() -> Self {
        TableClasses {
            wrapper: String::new(),
            table: "table-wrapper".to_string(),
            header: "table-header".to_string(),
            header_cell: "header-text".to_string(),
            body: "row-hover".to_string(),
            row: "table-row".to_string(),
            cell: "row-text".to_string(),
        }
    }
}
