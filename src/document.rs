use crate::{Connection, Graph, GraphStore, Node};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use ulid::Ulid;

/// A saved workflow: metadata plus the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub id: Ulid,
    pub name: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl WorkflowDocument {
    /// Create an empty document
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Ulid::new(),
            name: name.into(),
            created: now,
            updated: now,
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Document holding a copy of the store's current graph
    pub fn from_store(store: &GraphStore, name: impl Into<String>) -> Self {
        let mut doc = Self::new(name);
        doc.capture(store);
        doc
    }

    /// Capture the store's current graph into this document
    pub fn capture(&mut self, store: &GraphStore) {
        let graph = store.snapshot();
        self.nodes = graph.nodes;
        self.connections = graph.connections;
        self.touch();
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.updated = Utc::now();
    }

    pub fn into_graph(self) -> Graph {
        Graph {
            nodes: self.nodes,
            connections: self.connections,
        }
    }

    /// Save document to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create workflow file: {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .with_context(|| format!("Failed to write workflow to: {}", path.display()))?;
        Ok(())
    }

    /// Load document from file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open workflow file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse workflow from: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnchorKind, NodeKind, Point};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("workflow.json");

        let mut store = GraphStore::new();
        let a = store.add_node_to_canvas(NodeKind::Schedule, Some(Point::new(10.0, 20.0)));
        let b = store.add_node_to_canvas(NodeKind::Email, None);
        store
            .add_connection(&a, AnchorKind::Output, &b, AnchorKind::Input)
            .unwrap();
        store
            .update_node_config(&a, "interval", serde_json::json!(15))
            .unwrap();

        let doc = WorkflowDocument::from_store(&store, "Morning digest");
        doc.save(&path).unwrap();

        let loaded = WorkflowDocument::load(&path).unwrap();
        assert_eq!(loaded.id, doc.id);
        assert_eq!(loaded.name, "Morning digest");
        assert_eq!(loaded.into_graph(), store.snapshot());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = WorkflowDocument::load(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open workflow file"));
    }

    #[test]
    fn test_load_legacy_record_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.json");
        std::fs::write(
            &path,
            r#"{
                "id": "01HZY3Q7J8K9M0N1P2Q3R4S5T6",
                "name": "New Workflow",
                "created": "2024-05-01T10:00:00Z",
                "updated": "2024-05-01T10:00:00Z",
                "nodes": [
                    {"id": "node-1", "type": "webhook", "category": "trigger",
                     "title": "Webhook Trigger", "position": {"x": 100.0, "y": 100.0}}
                ]
            }"#,
        )
        .unwrap();

        let doc = WorkflowDocument::load(&path).unwrap();
        assert_eq!(doc.nodes.len(), 1);
        assert!(doc.connections.is_empty());
        assert_eq!(doc.nodes[0].kind, NodeKind::Webhook);
        assert!(doc.nodes[0].config.is_empty());
    }
}
