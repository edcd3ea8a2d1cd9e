//! The data source boundary.
//!
//! Pages fetch resources by path (`offices/3/sectors`) and hand the payload
//! to tables and cards. How the payload is produced is not the renderer's
//! concern; [`DataSource`] only fixes the contract: a parsed JSON payload,
//! or an empty object when anything goes wrong.
//!
//! [`FileSource`] serves payloads from a directory tree, which is what the
//! CLI and the tests use.

use std::path::{Component, Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::SourceError;

/// Something that resolves resource paths to JSON payloads.
pub trait DataSource {
    /// Fetches a resource, surfacing failures.
    fn try_fetch(&self, resource: &str) -> Result<Value, SourceError>;

    /// Fetches a resource, degrading to an empty object on failure.
    ///
    /// Failures are logged at error level.
    fn fetch(&self, resource: &str) -> Value {
        match self.try_fetch(resource) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(resource, error = %err, "fetch failed, using empty payload");
                Value::Object(Map::new())
            }
        }
    }

    /// Fetches a collection resource as rows. See [`rows_of`].
    fn fetch_rows(&self, resource: &str) -> Vec<Value> {
        rows_of(self.fetch(resource))
    }
}

/// Unwraps the API response envelope: `{"data": x, ...}` becomes `x`.
///
/// Sibling keys such as `meta` are dropped. Payloads without a `data` member
/// are returned unchanged.
pub fn unwrap_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Interprets a payload as table rows.
///
/// Arrays yield their elements in order. Anything else (including the
/// empty object of a failed fetch) yields no rows.
pub fn rows_of(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(rows) => rows,
        other => {
            if !is_empty_object(&other) {
                tracing::debug!(kind = kind_name(&other), "payload is not a list, no rows");
            }
            Vec::new()
        }
    }
}

fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serves resources from JSON files under a root directory.
///
/// `offices/3` resolves to `<root>/offices/3.json`, falling back to
/// `<root>/offices/3/index.json`. The `data` envelope is unwrapped.
#[derive(Clone, Debug)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileSource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files for a resource, in lookup order.
    fn candidates(&self, resource: &str) -> Result<[PathBuf; 2], SourceError> {
        let trimmed = resource.trim_matches('/');
        let relative = Path::new(trimmed);
        let is_safe = !trimmed.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_safe {
            return Err(SourceError::InvalidResource(resource.to_string()));
        }

        let base = self.root.join(relative);
        let mut file = base.clone().into_os_string();
        file.push(".json");
        Ok([PathBuf::from(file), base.join("index.json")])
    }
}

impl DataSource for FileSource {
    fn try_fetch(&self, resource: &str) -> Result<Value, SourceError> {
        let path = self
            .candidates(resource)?
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| SourceError::NotFound(resource.to_string()))?;

        let content = std::fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        let payload: Value =
            serde_json::from_str(&content).map_err(|source| SourceError::Json {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(resource, path = %path.display(), "fetched resource");
        Ok(unwrap_envelope(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("offices/3")).unwrap();
        fs::write(
            dir.path().join("offices.json"),
            r#"{"data":[{"officeId":3,"officeName":"Lisbon"}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("offices/3/index.json"),
            r#"{"data":{"officeId":3,"city":"Lisbon"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("offices/3/sectors.json"), "[{\"sectorId\":1}]").unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        dir
    }

    #[test]
    fn fetches_file_and_unwraps_envelope() {
        let dir = fixture();
        let source = FileSource::new(dir.path());
        assert_eq!(
            source.try_fetch("offices").unwrap(),
            json!([{ "officeId": 3, "officeName": "Lisbon" }])
        );
        assert_eq!(source.try_fetch("/offices/3/sectors").unwrap(), json!([{ "sectorId": 1 }]));
    }

    #[test]
    fn falls_back_to_index_file() {
        let dir = fixture();
        let source = FileSource::new(dir.path());
        assert_eq!(
            source.try_fetch("offices/3").unwrap(),
            json!({ "officeId": 3, "city": "Lisbon" })
        );
    }

    #[test]
    fn failures_degrade_to_empty_object() {
        let dir = fixture();
        let source = FileSource::new(dir.path());
        assert!(matches!(
            source.try_fetch("offices/9"),
            Err(SourceError::NotFound(_))
        ));
        assert!(matches!(
            source.try_fetch("broken"),
            Err(SourceError::Json { .. })
        ));
        assert_eq!(source.fetch("offices/9"), json!({}));
        assert_eq!(source.fetch("broken"), json!({}));
        assert!(source.fetch_rows("offices/9").is_empty());
    }

    #[test]
    fn rejects_escaping_paths() {
        let dir = fixture();
        let source = FileSource::new(dir.path().join("offices"));
        for bad in ["../offices", "3/../../offices", "", "/"] {
            assert!(
                matches!(source.try_fetch(bad), Err(SourceError::InvalidResource(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn rows_of_payloads() {
        assert_eq!(rows_of(json!([1, 2])), vec![json!(1), json!(2)]);
        assert!(rows_of(json!({})).is_empty());
        assert!(rows_of(json!({ "officeId": 1 })).is_empty());
        assert!(rows_of(Value::Null).is_empty());
    }

    #[test]
    fn envelope_siblings_are_ignored() {
        assert_eq!(unwrap_envelope(json!({ "data": [1] })), json!([1]));
        assert_eq!(
            unwrap_envelope(json!({ "data": [1], "meta": { "total": 1 } })),
            json!([1])
        );
        assert_eq!(unwrap_envelope(json!({ "data": null, "error": "x" })), Value::Null);
        assert_eq!(unwrap_envelope(json!({ "officeId": 1 })), json!({ "officeId": 1 }));
        assert_eq!(unwrap_envelope(json!([1])), json!([1]));
    }

    #[test]
    fn rows_come_from_envelope_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("offices.json"),
            r#"{"data":[{"officeId":1}],"meta":{"total":1}}"#,
        )
        .unwrap();
        let source = FileSource::new(dir.path());
        assert_eq!(source.fetch_rows("offices"), vec![json!({ "officeId": 1 })]);
    }
}
