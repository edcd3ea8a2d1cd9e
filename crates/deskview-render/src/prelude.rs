//! Commonly used types in one import.
//!
//! ```rust
//! use deskview_render::prelude::*;
//! use serde_json::json;
//!
//! let table = Table::new(vec![Column::key("name").header("Name")]);
//! let card = Card::new("People").section("Everyone", table.render_node(&[json!({ "name": "Ada" })]));
//! assert!(to_html(&card.into_node()).contains("Ada"));
//! ```

pub use crate::card::{Card, CardClasses};
pub use crate::html::to_html;
pub use crate::node::{Element, Node};
pub use crate::output::OutputMode;
pub use crate::source::{DataSource, FileSource};
pub use crate::table::{
    variants, CellContext, CellSpec, Column, ColumnSpec, HeaderFallback, RenderedTable, Table,
    TableClasses, TableSpec,
};
