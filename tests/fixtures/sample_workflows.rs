// Helper functions to build test workflows with various shapes

use workflow_canvas::{
    AnchorKind, GeometryAdapter, GraphStore, LayoutGeometry, NodeId, NodeKind, Point,
};

/// Default layout: 180x96 nodes, 28px header, 14px anchors at mid-height
pub fn geometry() -> LayoutGeometry {
    LayoutGeometry::default()
}

/// Webhook -> HTTP -> Slack, laid out left to right 300px apart
pub fn linear_workflow() -> (GraphStore, Vec<NodeId>) {
    let mut store = GraphStore::new();

    let trigger = store.add_node_to_canvas(NodeKind::Webhook, Some(Point::new(0.0, 0.0)));
    let request = store.add_node_to_canvas(NodeKind::Http, Some(Point::new(300.0, 0.0)));
    let notify = store.add_node_to_canvas(NodeKind::Slack, Some(Point::new(600.0, 0.0)));

    store
        .add_connection(&trigger, AnchorKind::Output, &request, AnchorKind::Input)
        .unwrap();
    store
        .add_connection(&request, AnchorKind::Output, &notify, AnchorKind::Input)
        .unwrap();

    (store, vec![trigger, request, notify])
}

/// A hub node wired to three neighbours on both sides
pub fn star_workflow() -> (GraphStore, NodeId, Vec<NodeId>) {
    let mut store = GraphStore::new();

    let hub = store.add_node_to_canvas(NodeKind::Code, Some(Point::new(400.0, 300.0)));
    let left = store.add_node_to_canvas(NodeKind::Manual, Some(Point::new(0.0, 300.0)));
    let right = store.add_node_to_canvas(NodeKind::Email, Some(Point::new(800.0, 300.0)));
    let below = store.add_node_to_canvas(NodeKind::Json, Some(Point::new(800.0, 600.0)));

    store
        .add_connection(&left, AnchorKind::Output, &hub, AnchorKind::Input)
        .unwrap();
    store
        .add_connection(&hub, AnchorKind::Output, &right, AnchorKind::Input)
        .unwrap();
    store
        .add_connection(&hub, AnchorKind::Output, &below, AnchorKind::Input)
        .unwrap();
    // Unrelated wire that must survive removal of the hub
    store
        .add_connection(&right, AnchorKind::Output, &below, AnchorKind::Input)
        .unwrap();

    (store, hub, vec![left, right, below])
}

/// Screen-space center of an anchor under the default geometry
pub fn anchor_point(store: &GraphStore, id: &NodeId, anchor: AnchorKind) -> Point {
    let node = store.node(id).unwrap();
    geometry().anchor_center(node, anchor)
}
