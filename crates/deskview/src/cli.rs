//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use deskview_render::OutputMode;

/// Render workspace tables and cards from JSON payloads.
#[derive(Debug, Parser)]
#[command(name = "deskview")]
#[command(version)]
#[command(about = "Render workspace tables and cards from JSON payloads")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file
    #[arg(long, env = "DESKVIEW_CONFIG", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory that resource paths resolve against
    #[arg(long, global = true, value_name = "DIR")]
    pub data_root: Option<PathBuf>,

    /// Output format: html, json, yaml, csv or text
    #[arg(short, long, global = true, value_name = "MODE")]
    pub output: Option<OutputMode>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a table from a column spec and a list payload
    Table(TableArgs),

    /// Render a card from titled sections
    Card(CardArgs),

    /// Render a MiniJinja page template
    Template(TemplateArgs),
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// Column spec file (YAML, or JSON with a .json extension)
    #[arg(long, value_name = "FILE")]
    pub columns: PathBuf,

    /// JSON file holding the rows
    #[arg(long, value_name = "FILE", conflicts_with = "resource", required_unless_present = "resource")]
    pub data: Option<PathBuf>,

    /// Resource path under the data root, e.g. offices/3/sectors
    #[arg(long, value_name = "PATH")]
    pub resource: Option<String>,

    /// Wrap the table in a card with this title
    #[arg(long, value_name = "TITLE")]
    pub card: Option<String>,

    /// Section label for the table inside the card
    #[arg(long, value_name = "LABEL", requires = "card")]
    pub section: Option<String>,
}

#[derive(Debug, Args)]
pub struct CardArgs {
    /// Card title
    #[arg(long)]
    pub title: String,

    /// Section as LABEL=CONTENT; repeat for more sections
    #[arg(long = "section", value_name = "LABEL=CONTENT", value_parser = parse_pair)]
    pub sections: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Template file
    pub file: PathBuf,

    /// JSON object merged into the template context
    #[arg(long, value_name = "JSON")]
    pub context: Option<String>,

    /// Fetch a resource into the context as NAME=PATH; repeatable
    #[arg(long = "resource", value_name = "NAME=PATH", value_parser = parse_pair)]
    pub resources: Vec<(String, String)>,
}

/// Splits `key=value` at the first `=`.
fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}
