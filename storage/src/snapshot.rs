//! # Tree Snapshots
//!
//! Loads a category tree with its side-data records from a JSON or YAML file.
//!
//! ```yaml
//! nodes:
//!   - id: shoes
//!     fields:
//!       message: "<p>New arrivals soon</p>"
//!   - id: sandals
//!     parent_id: shoes
//!     path: "|shoes|"
//!     fields:
//!       inherit: true
//! side_data:
//!   - id: img-1
//!     url: https://cdn.example/img-1.png
//! ```

use ec_core::{Node, SideDataRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub side_data: Vec<SideDataRecord>
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },

    #[error("Failed to parse JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String)
}

/// Reads a snapshot, picking the format from the file extension.
///
/// `.json` is parsed as JSON, `.yaml` and `.yml` as YAML.
pub fn load_snapshot(path: &Path) -> Result<TreeSnapshot, SnapshotError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source
    })?;

    let snapshot = match extension.as_str() {
        "json" => serde_json::from_str(&contents)?,
        "yaml" | "yml" => serde_yaml::from_str(&contents)?,
        other => return Err(SnapshotError::UnsupportedFormat(other.to_string()))
    };

    tracing::debug!(path = %path.display(), "Loaded category snapshot");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_yaml_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.yaml");
        fs::write(
            &path,
            r#"
nodes:
  - id: shoes
    fields:
      message: "<p>Soon</p>"
      side_data_ref: img-1
  - id: sandals
    parent_id: shoes
    path: "|shoes|"
    fields:
      inherit: true
side_data:
  - id: img-1
    url: https://cdn.example/img-1.png
"#
        )
        .unwrap();

        let snapshot = load_snapshot(&path).unwrap();

        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.nodes[0].message(), "<p>Soon</p>");
        assert!(snapshot.nodes[1].inherits());
        assert_eq!(snapshot.nodes[1].path_segments("|"), vec!["shoes"]);
        assert_eq!(snapshot.side_data[0].url, "https://cdn.example/img-1.png");
    }

    #[test]
    fn test_load_json_snapshot_with_null_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.json");
        fs::write(&path, r#"{"nodes": [{"id": "a", "fields": null}]}"#).unwrap();

        let snapshot = load_snapshot(&path).unwrap();

        assert!(snapshot.nodes[0].fields.is_empty());
        assert!(snapshot.side_data.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.csv");
        fs::write(&path, "id\n").unwrap();

        assert!(matches!(
            load_snapshot(&path),
            Err(SnapshotError::UnsupportedFormat(ext)) if ext == "csv"
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_snapshot(Path::new("/nonexistent/tree.json"));
        assert!(matches!(result, Err(SnapshotError::Io { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.json");
        fs::write(&path, "{nodes: ").unwrap();

        assert!(matches!(load_snapshot(&path), Err(SnapshotError::Json(_))));
    }
}
