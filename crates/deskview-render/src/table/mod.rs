//! Generic table rendering.
//!
//! A table is a column specification applied to an ordered slice of rows.
//! Each [`Column`] binds an accessor, an optional header label and a cell
//! renderer; [`Table::render`] produces a [`RenderedTable`] with one header
//! cell per column and one row per record.
//!
//! ## Typed rows
//!
//! ```rust
//! use deskview_render::table::{variants, Column, Table};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Office {
//!     office_id: u32,
//!     office_name: String,
//! }
//!
//! let table = Table::new(vec![
//!     Column::key("office_name")
//!         .header("Office Name")
//!         .cell(|ctx| variants::title(ctx.to_node())),
//!     Column::accessor("office_id", |o: &Office| o.office_id)
//!         .cell(|ctx| variants::link(format!("/offices/{}", ctx.text()), "Access office")),
//! ]);
//!
//! let offices = vec![Office { office_id: 1, office_name: "Lisbon".into() }];
//! let html = table.render_node(&offices).to_string();
//! assert!(html.contains(r#"href="/offices/1""#));
//! ```
//!
//! ## Declarative specs
//!
//! For JSON rows, [`TableSpec`] builds the same table from YAML or JSON; see
//! the [`spec`] module.
//!
//! ## Headers
//!
//! An unlabeled column renders a blank header cell; the cell is never
//! omitted. [`HeaderFallback::ColumnId`] shows the column id instead.
//!
//! ## Missing values
//!
//! Accessors that do not resolve produce `null`. The default cell renderer
//! shows `null` as an empty cell; custom renderers receive it unchanged.

mod extract;
mod render;
pub mod spec;
mod types;
pub mod variants;

pub use extract::{extract_value, value_to_node, value_to_text};
pub use render::{HeaderCell, RenderedCell, RenderedRow, RenderedTable, Table};
pub use spec::{CellSpec, ColumnSpec, TableSpec};
pub use types::{CellContext, CellRenderer, Column, HeaderFallback, TableClasses};
