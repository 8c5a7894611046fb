//! Host snapshots: one file's source, syntax tree and semantic model as a
//! single JSON document.
//!
//! A host bridge (the TypeScript side that owns the real parser and checker)
//! writes a snapshot per file; the CLI lints snapshots without linking a
//! parser.

use crate::context::FileContext;
use crate::semantic::SemanticModel;
use crate::syntax::{SyntaxTree, TreeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One file as seen by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    /// Path of the source file, relative to the snapshot file.
    pub path: PathBuf,
    /// Source text.
    pub source: String,
    /// Syntax tree whose spans index into `source`.
    pub tree: SyntaxTree,
    /// Semantic model, absent when the host ran without type information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<SemanticModel>,
}

/// Errors loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// IO error reading the snapshot.
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON of the expected shape.
    #[error("Failed to parse snapshot {path}: {source}")]
    Parse {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The syntax tree is not a tree.
    #[error("Invalid syntax tree in snapshot {path}: {source}")]
    Invalid {
        /// Snapshot path.
        path: PathBuf,
        /// Structural defect.
        source: TreeError,
    },
}

impl HostSnapshot {
    /// Reads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or holds
    /// a tree with cycles, shared or dangling children.
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Self =
            serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        snapshot
            .tree
            .validate()
            .map_err(|source| SnapshotError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(snapshot)
    }

    /// Serializes the snapshot as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Builds the rule context for this file.
    #[must_use]
    pub fn context(&self) -> FileContext<'_> {
        let ctx = FileContext::new(&self.path, &self.source, &self.tree);
        match &self.semantic {
            Some(model) => ctx.with_checker(model),
            None => ctx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::TypeStore;
    use crate::syntax::{NodeKind, Span, TreeBuilder};

    fn sample() -> HostSnapshot {
        let mut b = TreeBuilder::new();
        let x = b.ident("x", Span::new(0, 1));
        let stmt = b.expression_statement(x);
        let root = b.push(NodeKind::Program { body: vec![stmt] }, Span::new(0, 2));
        let mut store = TypeStore::new();
        let n = store.number();
        let mut model = SemanticModel::new(store);
        model.set_type(x, n);
        HostSnapshot {
            path: PathBuf::from("src/main.ts"),
            source: "x;".to_string(),
            tree: b.finish(root),
            semantic: Some(model),
        }
    }

    #[test]
    fn reads_snapshot_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("main.json");
        let snapshot = sample();
        std::fs::write(&path, snapshot.to_json().expect("json")).expect("write");

        let loaded = HostSnapshot::from_file(&path).expect("load");
        assert_eq!(loaded, snapshot);
        assert!(loaded.context().has_checker());
    }

    #[test]
    fn snapshot_without_semantic_model() {
        let json = r#"{
            "path": "a.ts",
            "source": "null",
            "tree": {
                "nodes": [{ "kind": "Literal", "value": { "type": "null" }, "span": { "start": 0, "end": 4 } }],
                "root": 0
            }
        }"#;
        let snapshot: HostSnapshot = serde_json::from_str(json).expect("parse");
        assert!(!snapshot.context().has_checker());
        assert_eq!(snapshot.tree.len(), 1);
    }

    #[test]
    fn malformed_snapshot_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{").expect("write");
        let err = HostSnapshot::from_file(&path).expect_err("malformed");
        assert!(matches!(err, SnapshotError::Parse { .. }));
    }

    #[test]
    fn cyclic_tree_is_rejected_on_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cycle.json");
        let json = r#"{
            "path": "a.ts",
            "source": "",
            "tree": {
                "nodes": [{ "kind": "Program", "body": [0], "span": { "start": 0, "end": 0 } }],
                "root": 0
            }
        }"#;
        std::fs::write(&path, json).expect("write");
        let err = HostSnapshot::from_file(&path).expect_err("cycle");
        assert!(matches!(
            err,
            SnapshotError::Invalid {
                source: TreeError::SharedChild { .. },
                ..
            }
        ));
    }
}
