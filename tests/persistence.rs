mod fixtures;

use fixtures::sample_workflows::linear_workflow;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use workflow_canvas::{
    AnchorKind, EditorConfig, GraphStore, NodeKind, OrderingPolicy, WorkflowDocument,
    WorkflowEditor,
};

#[test]
fn saved_workflow_reopens_identically() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("linear.json");

    let (store, _) = linear_workflow();
    WorkflowDocument::from_store(&store, "Linear").save(&path).unwrap();

    let mut editor = WorkflowEditor::default();
    editor.load(WorkflowDocument::load(&path).unwrap());

    assert_eq!(editor.workflow_name(), "Linear");
    assert_eq!(editor.store().snapshot(), store.snapshot());
}

#[test]
fn dangling_connections_dropped_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");

    let (store, ids) = linear_workflow();
    let mut document = WorkflowDocument::from_store(&store, "Broken");
    document.nodes.retain(|n| n.id != ids[2]);
    document.save(&path).unwrap();

    let mut loaded = GraphStore::new();
    loaded.replace(WorkflowDocument::load(&path).unwrap().into_graph());

    assert_eq!(loaded.node_count(), 2);
    assert_eq!(loaded.connection_count(), 1);
    assert!(loaded.connections().all(|c| !c.involves(&ids[2])));

    // Counters resume past the loaded ids
    let fresh = loaded.add_node_to_canvas(NodeKind::Noop, None);
    assert_eq!(fresh.as_str(), "node-3");
    let wire = loaded
        .add_connection(&ids[1], AnchorKind::Output, &fresh, AnchorKind::Input)
        .unwrap();
    assert_eq!(wire.as_str(), "conn-2");
}

#[test]
fn config_file_drives_editor() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("editor.toml");
    std::fs::write(
        &path,
        r#"
[canvas]
drop_fallback = { x = 250.0, y = 80.0 }

[run]
ordering = "dataflow"
"#,
    )
    .unwrap();

    let config = EditorConfig::load(&path).unwrap();
    assert_eq!(config.run.ordering, OrderingPolicy::Dataflow);

    let mut editor = WorkflowEditor::new(config);
    let trigger = editor.add_node_to_canvas(NodeKind::Manual, None);
    editor.add_node_to_canvas(NodeKind::Csv, None);
    assert_eq!(editor.store().node(&trigger).unwrap().position.x, 250.0);

    // Dataflow ordering skips the unconnected CSV node
    let outcome = editor.execute_workflow(std::time::Instant::now()).unwrap();
    assert_eq!(outcome.plan.order, vec![trigger]);
}
