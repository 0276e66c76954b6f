use std::time::Instant;

use workflow_canvas::{
    AnchorKind, ConnectionRouter, GeometryAdapter, LayoutGeometry, NodeKind, Point, RunSignal,
    Validator, WorkflowEditor,
};

fn main() {
    println!("Workflow Canvas - Simple Workflow");
    println!("=================================\n");

    let mut editor = WorkflowEditor::default();
    let geometry = LayoutGeometry::default();

    // Webhook -> HTTP request -> Slack message
    let webhook = editor.add_node_to_canvas(NodeKind::Webhook, Some(Point::new(40.0, 120.0)));
    let request = editor.add_node_to_canvas(NodeKind::Http, Some(Point::new(300.0, 120.0)));
    let notify = editor.add_node_to_canvas(NodeKind::Slack, Some(Point::new(560.0, 120.0)));

    let store = editor.store_mut();
    store
        .add_connection(&webhook, AnchorKind::Output, &request, AnchorKind::Input)
        .unwrap();
    store
        .add_connection(&request, AnchorKind::Output, &notify, AnchorKind::Input)
        .unwrap();
    store
        .update_node_config(&notify, "channel", "#alerts".into())
        .unwrap();

    println!("✓ Built workflow");
    println!("  Nodes: {}", editor.store().node_count());
    println!("  Connections: {}", editor.store().connection_count());

    // Drag the middle node down and reroute what it touches
    let dirty = editor
        .store_mut()
        .move_node(&request, Point::new(300.0, 260.0))
        .unwrap();
    println!("\n✓ Moved {} ({} connections rerouted)", request, dirty.len());
    for (id, route) in ConnectionRouter::reroute(&dirty, editor.store(), &geometry) {
        println!(
            "  {}: length {:.1}, angle {:.1}°",
            id, route.length, route.angle_degrees
        );
    }
    let node = editor.store().node(&request).unwrap();
    let input = geometry.anchor_center(node, AnchorKind::Input);
    println!("  Input anchor now at ({:.0}, {:.0})", input.x, input.y);

    let result = Validator::validate_store(editor.store());
    println!("\n✓ Validation: {} issue(s)", result.issues.len());

    // Play the run, stepping the clock instead of sleeping
    let start = Instant::now();
    let outcome = editor.execute_workflow(start).unwrap();
    println!("\n▶ {}", outcome);

    let mut now = start;
    while let Some(deadline) = editor.runs().next_deadline() {
        now = now.max(deadline);
        for signal in editor.tick(now) {
            match signal {
                RunSignal::Settled { node, outcome, .. } => {
                    println!("  {} → {}", node, outcome.message())
                }
                RunSignal::Completed { succeeded, .. } => {
                    println!("\n✅ Workflow completed: {} nodes succeeded", succeeded)
                }
                _ => {}
            }
        }
    }

    println!(
        "   Simulated duration: {:?}\n",
        now.duration_since(start)
    );
}
