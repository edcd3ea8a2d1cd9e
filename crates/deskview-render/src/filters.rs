//! MiniJinja filters and functions for page templates.
//!
//! Host page templates compose cards and tables through these helpers. All
//! of them return safe strings, so their markup is not escaped a second
//! time under auto-escaping.
//!
//! ## Filters
//!
//! - `title` - `{{ office.officeName | title }}`
//! - `link(href)` - `{{ "Access sector" | link("/offices/" ~ id) }}`
//!
//! ## Global Functions
//!
//! - `table(columns, rows, header_fallback=?)` - columns use the
//!   [`ColumnSpec`](crate::table::ColumnSpec) shape
//! - `card(title, sections)` - sections are `[title, content]` pairs
//!
//! ### Example
//!
//! ```jinja
//! {{ card("Office Details", [
//!     ["Office Name", office.officeName],
//!     ["Sectors", table([
//!         {"key": "sectorName", "header": "Sector Name", "cell": "title"},
//!         {"key": "sectorId", "cell": {"link": "/offices/1/{{ value }}", "label": "Access sector"}}
//!     ], sectors)]
//! ]) }}
//! ```

use minijinja::value::Kwargs;
use minijinja::{Environment, Error, ErrorKind, Value};
use serde::de::DeserializeOwned;

use crate::card::Card;
use crate::node::Node;
use crate::source::rows_of;
use crate::table::{variants, ColumnSpec, HeaderFallback, TableSpec};

/// Registers the `title`/`link` filters and `table`/`card` functions.
///
/// ```rust
/// use minijinja::{context, Environment};
/// use deskview_render::filters::register_filters;
///
/// let mut env = Environment::new();
/// register_filters(&mut env);
/// let out = env
///     .render_str(r#"{{ name | title }}"#, context! { name => "North" })
///     .unwrap();
/// assert_eq!(out, r#"<span class="title">North</span>"#);
/// ```
pub fn register_filters(env: &mut Environment<'_>) {
    env.add_filter("title", |value: Value| -> Value {
        safe(variants::title(to_node(&value)))
    });

    env.add_filter("link", |value: Value, href: String| -> Value {
        safe(variants::link(href, to_node(&value)))
    });

    env.add_function(
        "table",
        |columns: Value, rows: Value, kwargs: Kwargs| -> Result<Value, Error> {
            let columns: Vec<ColumnSpec> = from_template(&columns, "columns")?;
            let rows = rows_of(from_template::<serde_json::Value>(&rows, "rows")?);
            let header_fallback = match kwargs.get::<Option<String>>("header_fallback")?.as_deref()
            {
                None | Some("blank") => HeaderFallback::Blank,
                Some("column_id") | Some("key") => HeaderFallback::ColumnId,
                Some(other) => {
                    return Err(invalid(format!(
                        "invalid header_fallback '{}', expected 'blank' or 'column_id'",
                        other
                    )))
                }
            };
            kwargs.assert_all_used()?;

            let table = TableSpec {
                columns,
                header_fallback,
                classes: None,
            }
            .build()
            .map_err(|e| invalid(e.to_string()))?;
            Ok(safe(table.render_node(&rows)))
        },
    );

    env.add_function(
        "card",
        |title: String, sections: Option<Value>| -> Result<Value, Error> {
            let mut card = Card::new(title);
            if let Some(sections) = sections {
                for section in sections.try_iter()? {
                    let parts: Vec<Value> = section
                        .try_iter()
                        .map_err(|_| invalid("card sections must be [title, content] pairs"))?
                        .collect();
                    let [title, content] = parts.as_slice() else {
                        return Err(invalid("card sections must be [title, content] pairs"));
                    };
                    card = card.section(to_node(title), to_node(content));
                }
            }
            Ok(safe(card.into_node()))
        },
    );
}

/// Converts a template value to a node. Safe strings are kept as markup.
fn to_node(value: &Value) -> Node {
    if value.is_undefined() || value.is_none() {
        Node::Empty
    } else if value.is_safe() {
        Node::raw(value.to_string())
    } else if let Some(s) = value.as_str() {
        Node::text(s)
    } else {
        Node::text(value.to_string())
    }
}

fn safe(node: Node) -> Value {
    Value::from_safe_string(node.to_string())
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::new(ErrorKind::InvalidOperation, msg.into())
}

fn from_template<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T, Error> {
    serde_json::to_value(value)
        .and_then(serde_json::from_value)
        .map_err(|e| invalid(format!("invalid {}: {}", what, e)))
}
