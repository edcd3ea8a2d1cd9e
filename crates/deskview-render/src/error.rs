//! Error types.
//!
//! Rendering a table or card never fails. Errors only come from the edges:
//! loading column specs, reading data sources, and serializing output.

use std::path::PathBuf;

use thiserror::Error;

/// Error loading or building a declarative column spec.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The column spec file could not be read.
    #[error("failed to read column spec {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid YAML or an unknown cell kind.
    #[error("invalid column spec: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid JSON.
    #[error("invalid column spec: {0}")]
    Json(#[from] serde_json::Error),

    /// A cell template did not compile.
    #[error("invalid cell template in column '{column}': {source}")]
    Template {
        column: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Error reading from a data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No payload exists for the resource.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The resource path escapes the source root or is empty.
    #[error("invalid resource path: '{0}'")]
    InvalidResource(String),

    /// The payload file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error writing a render tree or table in an output format.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV serialization failed.
    #[error("serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// Output was not valid UTF-8.
    #[error("serialization error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The output mode needs tabular data.
    #[error("output mode '{0}' requires a table")]
    Unsupported(String),
}
