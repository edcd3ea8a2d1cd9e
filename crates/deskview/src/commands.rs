//! Subcommand handlers. Each returns the rendered output as a string.

use std::path::Path;

use anyhow::{bail, Context};
use deskview_render::filters::register_filters;
use deskview_render::{
    rows_of, unwrap_envelope, write_node, write_table, Card, DataSource, FileSource, Node,
    TableSpec,
};
use minijinja::Environment;
use serde_json::{Map, Value};

use crate::cli::{CardArgs, TableArgs, TemplateArgs};
use crate::config::Settings;

pub fn table(args: &TableArgs, settings: &Settings) -> anyhow::Result<String> {
    let mut spec = TableSpec::from_file(&args.columns)?;
    if spec.classes.is_none() {
        spec.classes = Some(settings.table_classes.clone());
    }
    let table = spec.build()?;

    let rows = match (&args.data, &args.resource) {
        (Some(path), _) => rows_of(unwrap_envelope(read_json(path)?)),
        (None, Some(resource)) => FileSource::new(&settings.data_root).fetch_rows(resource),
        (None, None) => bail!("either --data or --resource is required"),
    };
    tracing::info!(
        columns = table.num_columns(),
        rows = rows.len(),
        "rendering table"
    );

    let rendered = table.render(&rows);
    match &args.card {
        Some(title) => {
            let label = args.section.clone().unwrap_or_default();
            let card = Card::new(title.as_str())
                .classes(settings.card_classes.clone())
                .section(label, rendered.into_node());
            Ok(write_node(&card.into_node(), settings.output)?)
        }
        None => Ok(write_table(&rendered, settings.output)?),
    }
}

pub fn card(args: &CardArgs, settings: &Settings) -> anyhow::Result<String> {
    let card = args.sections.iter().fold(
        Card::new(args.title.as_str()).classes(settings.card_classes.clone()),
        |card, (label, content)| card.section(label.as_str(), section_content(content)),
    );
    Ok(write_node(&card.into_node(), settings.output)?)
}

/// Literal `\n` sequences in section content become line breaks.
fn section_content(content: &str) -> Node {
    if content.contains("\\n") {
        Node::lines(content.split("\\n"))
    } else {
        Node::text(content)
    }
}

pub fn template(args: &TemplateArgs, settings: &Settings) -> anyhow::Result<String> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read template {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("page.html")
        .to_string();

    let mut ctx = match &args.context {
        Some(json) => match serde_json::from_str(json).context("invalid --context")? {
            Value::Object(map) => map,
            other => bail!("--context must be a JSON object, got {}", other),
        },
        None => Map::new(),
    };

    let data = FileSource::new(&settings.data_root);
    for (key, resource) in &args.resources {
        ctx.insert(key.clone(), data.fetch(resource));
    }

    let mut env = Environment::new();
    register_filters(&mut env);
    env.add_template_owned(name.clone(), source)
        .with_context(|| format!("invalid template {}", name))?;
    let output = env
        .get_template(&name)?
        .render(Value::Object(ctx))
        .with_context(|| format!("failed to render {}", name))?;
    Ok(output)
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}
