//! Declarative column specifications for JSON rows.
//!
//! A [`TableSpec`] describes a table over `serde_json::Value` rows in YAML or
//! JSON, so pages can define their tables without Rust code:
//!
//! ```yaml
//! header_fallback: blank
//! columns:
//!   - key: sectorName
//!     header: Sector Name
//!     cell: title
//!   - key: sectorId
//!     cell:
//!       link: "/offices/{{ row.officeId }}/{{ value }}"
//!       label: Access sector
//! ```
//!
//! Cell kinds:
//!
//! | `cell` | Renders |
//! |--------|---------|
//! | `text` (default) | The value as text |
//! | `title` | The value inside the title variant |
//! | `{link: <href>, label: <label>}` | The link variant; `label` defaults to the value |
//! | `{template: <text>}` | The rendered template as text |
//!
//! Link `href`/`label` and `template` are MiniJinja templates with `value`
//! (the cell value) and `row` (the whole row) in scope. `null` and missing
//! values print as nothing. Templates are compiled when the spec is built,
//! so syntax errors surface as [`SpecError::Template`].
//!
//! ```yaml
//! columns:
//!   - key: isPermanent
//!     header: Permanent
//!     cell:
//!       template: '{{ "Yes" if value else "No" }}'
//! ```

use std::path::Path;
use std::sync::Arc;

use minijinja::{context, escape_formatter, Environment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::render::Table;
use super::types::{CellContext, Column, HeaderFallback, TableClasses};
use super::variants;
use crate::error::SpecError;
use crate::node::Node;

/// A table over JSON rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Columns, in display order.
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    /// What unlabeled columns show in the header.
    #[serde(default)]
    pub header_fallback: HeaderFallback,
    /// CSS class overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<TableClasses>,
}

impl TableSpec {
    /// Parses a spec from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a spec from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a spec file. `.json` files are parsed as JSON, anything else as YAML.
    ///
    /// A bare list of columns is accepted as shorthand for `{columns: [...]}`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let spec = if is_json {
            parse_spec_file(
                || serde_json::from_str::<TableSpec>(&content),
                || serde_json::from_str::<Vec<ColumnSpec>>(&content),
                || serde_json::from_str::<Value>(&content).is_ok_and(|v| v.is_array()),
            )?
        } else {
            parse_spec_file(
                || serde_yaml::from_str::<TableSpec>(&content),
                || serde_yaml::from_str::<Vec<ColumnSpec>>(&content),
                || {
                    serde_yaml::from_str::<serde_yaml::Value>(&content)
                        .is_ok_and(|v| v.is_sequence())
                },
            )?
        };
        tracing::debug!(path = %path.display(), "loaded column spec");
        Ok(spec)
    }

    /// Builds the table.
    pub fn build(&self) -> Result<Table<Value>, SpecError> {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| col.to_column(i))
            .collect::<Result<Vec<_>, _>>()?;
        let mut table = Table::new(columns).header_fallback(self.header_fallback);
        if let Some(classes) = &self.classes {
            table = table.classes(classes.clone());
        }
        Ok(table)
    }
}

/// Parses a spec file as a full spec, falling back to a bare column list.
///
/// On failure the error of the shape the document actually has is kept, so
/// messages such as an invalid cell kind survive.
fn parse_spec_file<E>(
    full: impl FnOnce() -> Result<TableSpec, E>,
    list: impl FnOnce() -> Result<Vec<ColumnSpec>, E>,
    is_list: impl Fn() -> bool,
) -> Result<TableSpec, E> {
    let full_err = match full() {
        Ok(spec) => return Ok(spec),
        Err(err) => err,
    };
    match list() {
        Ok(columns) => Ok(TableSpec {
            columns,
            ..TableSpec::default()
        }),
        Err(list_err) if is_list() => Err(list_err),
        Err(_) => Err(full_err),
    }
}

/// One column of a [`TableSpec`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Key path into the row. Without a key the column reads no value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Column id. Defaults to the key, then to `col{index}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Header label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// How the cell renders.
    #[serde(default)]
    pub cell: CellSpec,
}

impl ColumnSpec {
    /// Shorthand for a text column.
    pub fn key(key: impl Into<String>) -> Self {
        ColumnSpec {
            key: Some(key.into()),
            ..ColumnSpec::default()
        }
    }

    /// Sets the header label.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the cell kind.
    pub fn cell(mut self, cell: CellSpec) -> Self {
        self.cell = cell;
        self
    }

    /// Builds the column at position `index`.
    pub fn to_column(&self, index: usize) -> Result<Column<Value>, SpecError> {
        let id = self
            .id
            .clone()
            .or_else(|| self.key.clone())
            .unwrap_or_else(|| format!("col{}", index));

        let mut column = match &self.key {
            Some(key) => Column::key(key.clone()).with_id(id.clone()),
            None => Column::display(id.clone()),
        };
        if let Some(header) = &self.header {
            column = column.header(header.clone());
        }

        Ok(match &self.cell {
            CellSpec::Text => column,
            CellSpec::Title => column.cell(|ctx| variants::title(ctx.to_node())),
            CellSpec::Link { href, label } => {
                let mut sources = vec![(HREF, href.as_str())];
                if let Some(label) = label {
                    sources.push((LABEL, label.as_str()));
                }
                let templates = CellTemplates::compile(&id, &sources)?;
                column.cell(move |ctx| link_cell(&templates, ctx))
            }
            CellSpec::Template { template } => {
                let templates = CellTemplates::compile(&id, &[(TEXT, template.as_str())])?;
                column.cell(move |ctx| match templates.render(TEXT, ctx) {
                    Some(text) => Node::text(text),
                    None => ctx.to_node(),
                })
            }
        })
    }
}

/// How a spec column renders its cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CellRaw", into = "CellRaw")]
pub enum CellSpec {
    /// The value as text.
    #[default]
    Text,
    /// The value inside the title variant.
    Title,
    /// The link variant.
    Link {
        /// Href template.
        href: String,
        /// Label template. Defaults to the cell value.
        label: Option<String>,
    },
    /// A template rendered to text, e.g. `{{ "Yes" if value else "No" }}`.
    Template {
        /// The template source.
        template: String,
    },
}

impl CellSpec {
    /// A link cell.
    pub fn link(href: impl Into<String>) -> Self {
        CellSpec::Link {
            href: href.into(),
            label: None,
        }
    }

    /// A link cell with a fixed or templated label.
    pub fn link_with_label(href: impl Into<String>, label: impl Into<String>) -> Self {
        CellSpec::Link {
            href: href.into(),
            label: Some(label.into()),
        }
    }

    /// A text cell rendered from a template.
    pub fn template(template: impl Into<String>) -> Self {
        CellSpec::Template {
            template: template.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CellRaw {
    Named(String),
    Link {
        link: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Template {
        template: String,
    },
}

impl From<CellSpec> for CellRaw {
    fn from(cell: CellSpec) -> Self {
        match cell {
            CellSpec::Text => CellRaw::Named("text".to_string()),
            CellSpec::Title => CellRaw::Named("title".to_string()),
            CellSpec::Link { href, label } => CellRaw::Link { link: href, label },
            CellSpec::Template { template } => CellRaw::Template { template },
        }
    }
}

impl TryFrom<CellRaw> for CellSpec {
    type Error = String;

    fn try_from(raw: CellRaw) -> Result<Self, Self::Error> {
        match raw {
            CellRaw::Named(s) if s == "text" => Ok(CellSpec::Text),
            CellRaw::Named(s) if s == "title" => Ok(CellSpec::Title),
            CellRaw::Named(s) => Err(format!(
                "Invalid cell kind: '{}'. Expected 'text', 'title', a link or a template object.",
                s
            )),
            CellRaw::Link { link, label } => Ok(CellSpec::Link { href: link, label }),
            CellRaw::Template { template } => Ok(CellSpec::Template { template }),
        }
    }
}

const HREF: &str = "href";
const LABEL: &str = "label";
const TEXT: &str = "text";

/// Compiled cell templates of one spec column.
struct CellTemplates {
    env: Arc<Environment<'static>>,
}

impl CellTemplates {
    fn compile(column: &str, sources: &[(&'static str, &str)]) -> Result<Self, SpecError> {
        let mut env = Environment::new();
        // `none` prints as nothing, like an empty cell.
        env.set_formatter(|out, state, value| {
            if value.is_none() {
                Ok(())
            } else {
                escape_formatter(out, state, value)
            }
        });
        for &(name, text) in sources {
            env.add_template_owned(name, text.to_string())
                .map_err(|source| SpecError::Template {
                    column: column.to_string(),
                    source,
                })?;
        }
        Ok(CellTemplates { env: Arc::new(env) })
    }

    fn has(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    fn render(&self, name: &str, ctx: &CellContext<'_, Value>) -> Option<String> {
        let rendered = self
            .env
            .get_template(name)
            .and_then(|t| t.render(context! { value => ctx.value, row => ctx.row }));
        match rendered {
            Ok(s) => Some(s),
            Err(err) => {
                tracing::debug!(
                    column = ctx.column_id,
                    template = name,
                    error = %err,
                    "cell template failed, falling back"
                );
                None
            }
        }
    }
}

/// Renders the link variant. A failing href leaves the label alone.
fn link_cell(templates: &CellTemplates, ctx: &CellContext<'_, Value>) -> Node {
    let label = if templates.has(LABEL) {
        match templates.render(LABEL, ctx) {
            Some(label) => Node::text(label),
            None => ctx.to_node(),
        }
    } else {
        ctx.to_node()
    };

    match templates.render(HREF, ctx) {
        Some(href) => variants::link(href, label),
        None => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const SECTORS: &str = r#"
columns:
  - key: sectorName
    header: Sector Name
    cell: title
  - key: sectorId
    cell:
      link: "/offices/{{ row.officeId }}/{{ value }}"
      label: Access sector
"#;

    #[test]
    fn parses_yaml_spec() {
        let spec = TableSpec::from_yaml(SECTORS).unwrap();
        assert_eq!(spec.columns.len(), 2);
        assert_eq!(spec.columns[0].cell, CellSpec::Title);
        assert_eq!(
            spec.columns[1].cell,
            CellSpec::link_with_label("/offices/{{ row.officeId }}/{{ value }}", "Access sector")
        );
        assert_eq!(spec.header_fallback, HeaderFallback::Blank);
    }

    #[test]
    fn renders_link_from_row_and_value() {
        let table = TableSpec::from_yaml(SECTORS).unwrap().build().unwrap();
        let node = table.render_node(&[json!({
            "officeId": 4,
            "sectorId": 12,
            "sectorName": "North"
        })]);

        let anchor = node.find("a").unwrap();
        assert_eq!(anchor.get_attr("href"), Some("/offices/4/12"));
        assert_eq!(anchor.text_content(), "Access sector");
        assert_eq!(node.find("td").unwrap().text_content(), "North");
        assert!(node.to_string().contains(r#"<span class="title">North</span>"#));
    }

    #[test]
    fn link_label_defaults_to_value() {
        let spec = TableSpec {
            columns: vec![ColumnSpec::key("name").cell(CellSpec::link("/x/{{ value }}"))],
            ..TableSpec::default()
        };
        let node = spec.build().unwrap().render_node(&[json!({ "name": "desk-1" })]);
        let anchor = node.find("a").unwrap();
        assert_eq!(anchor.get_attr("href"), Some("/x/desk-1"));
        assert_eq!(anchor.text_content(), "desk-1");
    }

    #[test]
    fn invalid_cell_kind_is_rejected() {
        let err = TableSpec::from_yaml("columns:\n  - key: a\n    cell: bold\n").unwrap_err();
        assert!(matches!(err, SpecError::Yaml(_)));
    }

    #[test]
    fn invalid_template_is_rejected_at_build() {
        let spec = TableSpec {
            columns: vec![ColumnSpec::key("a").cell(CellSpec::link("/x/{{ value"))],
            ..TableSpec::default()
        };
        match spec.build() {
            Err(SpecError::Template { column, .. }) => assert_eq!(column, "a"),
            other => panic!("expected template error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn failing_template_renders_label_only() {
        let spec = TableSpec {
            columns: vec![ColumnSpec::key("a").cell(CellSpec::link("{{ value.missing() }}"))],
            ..TableSpec::default()
        };
        let node = spec.build().unwrap().render_node(&[json!({ "a": "x" })]);
        assert!(node.find("a").is_none());
        assert_eq!(node.find("td").unwrap().text_content(), "x");
    }

    #[test]
    fn missing_values_print_as_nothing_in_templates() {
        let spec = TableSpec {
            columns: vec![
                ColumnSpec::key("officeId")
                    .cell(CellSpec::link_with_label("/offices/1/{{ value }}", "Open")),
                ColumnSpec::key("note").cell(CellSpec::template("[{{ value }}|{{ row.floor }}]")),
            ],
            ..TableSpec::default()
        };
        let node = spec
            .build()
            .unwrap()
            .render_node(&[json!({ "other": 1, "floor": null })]);

        assert_eq!(node.find("a").unwrap().get_attr("href"), Some("/offices/1/"));
        assert_eq!(node.find_all("td")[1].text_content(), "[|]");
        assert!(!node.to_string().contains("None"));
    }

    #[test]
    fn reservation_columns_with_template_cell() {
        let spec = TableSpec::from_yaml(
            r#"
columns:
  - key: employeeName
    header: Employee
    cell: title
  - key: officeName
    header: Office
  - key: isPermanent
    header: Permanent
    cell:
      template: '{{ "Yes" if value else "No" }}'
  - key: startingDate
    header: Starting Date
  - key: finishingDate
    header: Finishing Date
  - key: reservationId
    cell:
      link: "/reservations/{{ value }}"
      label: Access Reservation
"#,
        )
        .unwrap();
        assert_eq!(
            spec.columns[2].cell,
            CellSpec::template(r#"{{ "Yes" if value else "No" }}"#)
        );

        let rendered = spec.build().unwrap().render(&[
            json!({
                "employeeName": "Ana",
                "officeName": "Lisbon HQ",
                "isPermanent": true,
                "startingDate": "2023-01-02",
                "finishingDate": "2023-06-30",
                "reservationId": 9
            }),
            json!({ "employeeName": "Rui", "officeName": "Porto", "isPermanent": false, "reservationId": 10 }),
        ]);

        assert_eq!(
            rendered.header_labels(),
            vec!["Employee", "Office", "Permanent", "Starting Date", "Finishing Date", ""]
        );
        assert_eq!(
            rendered.text_rows(),
            vec![
                vec!["Ana", "Lisbon HQ", "Yes", "2023-01-02", "2023-06-30", "Access Reservation"],
                vec!["Rui", "Porto", "No", "", "", "Access Reservation"],
            ]
        );
        let hrefs: Vec<String> = rendered
            .into_node()
            .find_all("a")
            .iter()
            .filter_map(|a| a.get_attr("href").map(str::to_string))
            .collect();
        assert_eq!(hrefs, vec!["/reservations/9", "/reservations/10"]);
    }

    #[test]
    fn template_cell_shape_round_trips() {
        let spec = TableSpec::from_json(r#"{"columns":[{"key":"a","cell":{"template":"{{ value }}!"}}]}"#)
            .unwrap();
        assert_eq!(spec.columns[0].cell, CellSpec::template("{{ value }}!"));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["columns"][0]["cell"], json!({ "template": "{{ value }}!" }));
    }

    #[test]
    fn invalid_template_cell_is_rejected_at_build() {
        let spec = TableSpec {
            columns: vec![ColumnSpec::key("flag").cell(CellSpec::template("{% if value %}"))],
            ..TableSpec::default()
        };
        let err = spec.build().unwrap_err();
        assert!(err.to_string().contains("invalid cell template in column 'flag'"));
    }

    #[test]
    fn file_errors_keep_the_cell_kind_message() {
        let mut full = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        full.write_all(b"columns:\n  - key: a\n    cell: bold\n").unwrap();
        let msg = TableSpec::from_file(full.path()).unwrap_err().to_string();
        assert!(msg.contains("Invalid cell kind: 'bold'"), "{}", msg);

        let mut list = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        list.write_all(br#"[{"key":"a","cell":"bold"}]"#).unwrap();
        let msg = TableSpec::from_file(list.path()).unwrap_err().to_string();
        assert!(msg.contains("Invalid cell kind: 'bold'"), "{}", msg);
    }

    #[test]
    fn ids_default_to_key_then_position() {
        let spec = TableSpec {
            columns: vec![
                ColumnSpec::key("name"),
                ColumnSpec {
                    cell: CellSpec::link_with_label("/r/{{ row.id }}", "Open"),
                    ..ColumnSpec::default()
                },
            ],
            header_fallback: HeaderFallback::ColumnId,
            classes: None,
        };
        let table = spec.build().unwrap();
        let rendered = table.render(&[json!({ "id": 5, "name": "n" })]);
        assert_eq!(rendered.header_labels(), vec!["name", "col1"]);
        let node = rendered.into_node();
        assert_eq!(node.find("a").unwrap().get_attr("href"), Some("/r/5"));
    }

    #[test]
    fn json_spec_and_round_trip_of_cell_shape() {
        let spec = TableSpec::from_json(
            r#"{"columns":[{"key":"a","cell":{"link":"/a/{{ value }}"}},{"key":"b","cell":"title"}]}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["columns"][0]["cell"], json!({ "link": "/a/{{ value }}" }));
        assert_eq!(json["columns"][1]["cell"], json!("title"));
    }

    #[test]
    fn loads_files_by_extension() {
        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        yaml.write_all(b"- key: a\n  header: A\n").unwrap();
        let spec = TableSpec::from_file(yaml.path()).unwrap();
        assert_eq!(spec.columns[0].header.as_deref(), Some("A"));

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json.write_all(br#"{"columns":[{"key":"b"}],"header_fallback":"column_id"}"#)
            .unwrap();
        let spec = TableSpec::from_file(json.path()).unwrap();
        assert_eq!(spec.columns[0].key.as_deref(), Some("b"));
        assert_eq!(spec.header_fallback, HeaderFallback::ColumnId);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TableSpec::from_file("/nonexistent/columns.yaml").unwrap_err();
        assert!(matches!(err, SpecError::Io { .. }));
    }
}
