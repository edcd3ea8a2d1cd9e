//! The `deskview.yaml` configuration file.
//!
//! ```yaml
//! data_root: ./fixtures
//! output: html
//! table_classes:
//!   table: table-wrapper
//!   row: table-row
//! card_classes:
//!   card: panel
//! ```
//!
//! Every key is optional. A relative `data_root` resolves against the
//! directory holding the file. Command-line flags win over file values.

use std::path::{Path, PathBuf};

use anyhow::Context;
use deskview_render::{CardClasses, OutputMode, TableClasses};
use serde::Deserialize;

use crate::cli::Cli;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_root: Option<PathBuf>,
    pub output: Option<OutputMode>,
    pub table_classes: Option<TableClasses>,
    pub card_classes: Option<CardClasses>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;

        if let Some(root) = config.data_root.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.data_root = Some(base.join(root));
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Effective settings after layering flags over the config file.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub data_root: PathBuf,
    pub output: OutputMode,
    pub table_classes: TableClasses,
    pub card_classes: CardClasses,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        Ok(Self::merge(cli, config))
    }

    fn merge(cli: &Cli, config: Config) -> Self {
        Settings {
            data_root: cli
                .data_root
                .clone()
                .or(config.data_root)
                .unwrap_or_else(|| PathBuf::from(".")),
            output: cli.output.or(config.output).unwrap_or_default(),
            table_classes: config.table_classes.unwrap_or_default(),
            card_classes: config.card_classes.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::from_yaml("colour: red").is_err());
    }

    #[test]
    fn partial_classes_keep_defaults() {
        let config = Config::from_yaml("card_classes:\n  card: panel\n").unwrap();
        let classes = config.card_classes.unwrap();
        assert_eq!(classes.card, "panel");
        assert_eq!(classes.section_title, "section-title");
    }

    #[test]
    fn data_root_is_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deskview.yaml");
        std::fs::write(&path, "data_root: fixtures\noutput: text\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_root, Some(dir.path().join("fixtures")));
        assert_eq!(config.output, Some(OutputMode::Text));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "deskview", "--data-root", "/srv/data", "-o", "csv", "card", "--title", "T",
        ]);
        let config = Config {
            data_root: Some(PathBuf::from("/other")),
            output: Some(OutputMode::Json),
            ..Config::default()
        };
        let settings = Settings::merge(&cli, config);
        assert_eq!(settings.data_root, PathBuf::from("/srv/data"));
        assert_eq!(settings.output, OutputMode::Csv);
    }

    #[test]
    fn defaults_without_config() {
        let cli = Cli::parse_from(["deskview", "card", "--title", "T"]);
        let settings = Settings::merge(&cli, Config::default());
        assert_eq!(settings.data_root, PathBuf::from("."));
        assert_eq!(settings.output, OutputMode::Html);
        assert_eq!(settings.table_classes, TableClasses::default());
    }
}
