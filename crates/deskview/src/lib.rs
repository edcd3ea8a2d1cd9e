//! # deskview
//!
//! Command-line front end for `deskview-render`. Reads column specs and
//! JSON payloads from disk and prints tables, cards or whole page
//! templates in any [`OutputMode`](deskview_render::OutputMode).
//!
//! ```text
//! deskview table --columns sectors.yaml --resource offices/3/sectors
//! deskview card --title "Office Details" --section "Office Name=Lisbon HQ"
//! deskview template office.html --resource office=offices/3 --resource sectors=offices/3/sectors
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::{Config, Settings};

/// Runs a parsed command line and returns what should be printed.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let settings = Settings::resolve(cli)?;
    tracing::debug!(
        data_root = %settings.data_root.display(),
        output = %settings.output,
        "resolved settings"
    );

    match &cli.command {
        Command::Table(args) => commands::table(args, &settings),
        Command::Card(args) => commands::card(args, &settings),
        Command::Template(args) => commands::template(args, &settings),
    }
}
