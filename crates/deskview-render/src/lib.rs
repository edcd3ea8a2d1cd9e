//! # Deskview Render - Tables and Cards as Render Trees
//!
//! `deskview-render` renders organizational workspace data (offices,
//! sectors, workstations, reservations) into two presentational
//! components: a generic data [`Table`] driven by a column specification,
//! and a titled [`Card`] with labeled sections. Both produce a [`Node`]
//! render tree that serializes to HTML or to JSON/YAML.
//!
//! ## Core Concepts
//!
//! - [`Column`]: accessor + optional header label + cell renderer
//! - [`Table`]: renders any slice of rows, one cell per column per row
//! - [`variants`]: `title` and `link` wrappers for cell renderers
//! - [`Card`]: title plus (section-title, section-content) pairs
//! - [`TableSpec`]: the same tables declared in YAML/JSON for JSON rows
//! - [`DataSource`]: the boundary that supplies row payloads
//!
//! ## Quick Start
//!
//! ```rust
//! use deskview_render::{variants, Card, Column, Node, Table};
//! use serde_json::json;
//!
//! let office_id = 3;
//! let sectors = Table::new(vec![
//!     Column::key("sectorName")
//!         .header("Sector Name")
//!         .cell(|ctx| variants::title(ctx.to_node())),
//!     Column::key("sectorId").cell(move |ctx| {
//!         variants::link(format!("/offices/{}/{}", office_id, ctx.text()), "Access sector")
//!     }),
//! ]);
//!
//! let rows = vec![json!({ "sectorId": 12, "sectorName": "North Wing" })];
//!
//! let page = Card::new("Office Details")
//!     .section("Office Name", "Lisbon HQ")
//!     .section("Address", Node::lines(["Rua Augusta 12", "1100-053 Lisboa"]))
//!     .section("Sectors", sectors.render_node(&rows));
//!
//! let html = page.into_node().to_string();
//! assert!(html.contains(r#"<a class="link" href="/offices/3/12"><span>Access sector</span></a>"#));
//! ```
//!
//! ## Templates
//!
//! [`filters::register_filters`] exposes `title`, `link`, `table(...)` and
//! `card(...)` to MiniJinja page templates.

pub mod card;
mod error;
pub mod filters;
pub mod html;
pub mod node;
pub mod output;
pub mod prelude;
pub mod source;
pub mod table;

pub use card::{Card, CardClasses, Section};
pub use error::{RenderError, SourceError, SpecError};
pub use html::to_html;
pub use node::{Element, Node};
pub use output::{write_node, write_table, OutputMode};
pub use source::{rows_of, unwrap_envelope, DataSource, FileSource};
pub use table::{
    variants, CellContext, CellSpec, Column, ColumnSpec, HeaderFallback, RenderedTable, Table,
    TableClasses, TableSpec,
};
