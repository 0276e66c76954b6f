mod fixtures;

use assert_matches::assert_matches;
use fixtures::sample_workflows::{anchor_point, geometry, linear_workflow};
use workflow_canvas::{
    AnchorKind, GestureController, GestureOutcome, GestureState, GraphStore, NodeKind, Point,
    PointerDevice, PointerEvent, RejectReason,
};

fn connect_by_drag(
    gestures: &mut GestureController,
    store: &mut GraphStore,
    from: Point,
    to: Point,
) -> GestureOutcome {
    let geometry = geometry();
    gestures.handle(PointerEvent::down(from), store, &geometry);
    gestures.handle(PointerEvent::moved(to), store, &geometry);
    gestures.handle(PointerEvent::up(to), store, &geometry)
}

#[test]
fn drag_from_output_to_input_connects() {
    let mut store = GraphStore::new();
    let a = store.add_node_to_canvas(NodeKind::Schedule, Some(Point::new(0.0, 0.0)));
    let b = store.add_node_to_canvas(NodeKind::Email, Some(Point::new(400.0, 200.0)));
    let mut gestures = GestureController::new();

    let from = anchor_point(&store, &a, AnchorKind::Output);
    let to = anchor_point(&store, &b, AnchorKind::Input);
    let outcome = connect_by_drag(
        &mut gestures,
        &mut store,
        from,
        to,
    );

    assert_matches!(outcome, GestureOutcome::Connected { replaced: None, .. });
    assert!(gestures.is_idle());
    let connection = store.connections().next().unwrap();
    assert_eq!(connection.source_node, a);
    assert_eq!(connection.target_node, b);
}

#[test]
fn dragging_same_wire_twice_is_rejected_as_duplicate() {
    let (mut store, ids) = linear_workflow();
    let mut gestures = GestureController::new();

    let from = anchor_point(&store, &ids[0], AnchorKind::Output);
    let to = anchor_point(&store, &ids[1], AnchorKind::Input);
    let outcome = connect_by_drag(
        &mut gestures,
        &mut store,
        from,
        to,
    );

    assert_eq!(
        outcome,
        GestureOutcome::ConnectionRejected {
            reason: RejectReason::Duplicate
        }
    );
    assert_eq!(store.connection_count(), 2);
}

#[test]
fn release_on_empty_canvas_leaves_graph_unchanged() {
    let (mut store, ids) = linear_workflow();
    let before = store.snapshot();
    let mut gestures = GestureController::new();

    let from = anchor_point(&store, &ids[2], AnchorKind::Output);
    let to = Point::new(1000.0, 700.0);
    let outcome = connect_by_drag(
        &mut gestures,
        &mut store,
        from,
        to,
    );

    assert_eq!(outcome, GestureOutcome::ConnectionMissed { removed: None });
    assert_eq!(store.snapshot(), before);
}

#[test]
fn node_drag_reports_dirty_connections() {
    let (mut store, ids) = linear_workflow();
    let geometry = geometry();
    let mut gestures = GestureController::new();

    // Header strip of the middle node
    gestures.handle(PointerEvent::down(Point::new(310.0, 10.0)), &mut store, &geometry);
    let outcome = gestures.handle(
        PointerEvent::moved(Point::new(330.0, 110.0)),
        &mut store,
        &geometry,
    );

    let GestureOutcome::NodeMoved { node, dirty } = outcome else {
        panic!("expected NodeMoved, got {:?}", outcome);
    };
    assert_eq!(node, ids[1]);
    assert_eq!(dirty.len(), 2);
    assert_eq!(store.node(&ids[1]).unwrap().position, Point::new(320.0, 100.0));

    let outcome = gestures.handle(
        PointerEvent::leave(Point::new(330.0, 110.0)),
        &mut store,
        &geometry,
    );
    assert_ne!(outcome, GestureOutcome::Ignored);
    assert!(gestures.is_idle());
    // Leaving keeps the node where it was dropped
    assert_eq!(store.node(&ids[1]).unwrap().position, Point::new(320.0, 100.0));
}

#[test]
fn second_pointer_is_ignored_during_drag() {
    let (mut store, ids) = linear_workflow();
    let geometry = geometry();
    let mut gestures = GestureController::new();

    let touch = |event: PointerEvent, id| event.with_pointer(id, PointerDevice::Touch);

    gestures.handle(touch(PointerEvent::down(Point::new(10.0, 10.0)), 1), &mut store, &geometry);
    let outcome = gestures.handle(
        touch(PointerEvent::moved(Point::new(500.0, 500.0)), 2),
        &mut store,
        &geometry,
    );
    assert_eq!(outcome, GestureOutcome::Ignored);
    assert_eq!(store.node(&ids[0]).unwrap().position, Point::new(0.0, 0.0));

    let outcome = gestures.handle(
        touch(PointerEvent::up(Point::new(10.0, 10.0)), 1),
        &mut store,
        &geometry,
    );
    assert_eq!(outcome, GestureOutcome::NodeDropped { node: ids[0].clone() });
}

#[test]
fn reattach_moves_wire_to_new_target() {
    let (mut store, ids) = linear_workflow();
    let geometry = geometry();
    let spare = store.add_node_to_canvas(NodeKind::Email, Some(Point::new(600.0, 300.0)));
    let original = store
        .incoming(&ids[2])
        .first()
        .map(|c| c.id.clone())
        .unwrap();
    let mut gestures = GestureController::new();

    // Pick the wire up by its target end
    let outcome = gestures.handle(
        PointerEvent::down(anchor_point(&store, &ids[2], AnchorKind::Input)).detaching(),
        &mut store,
        &geometry,
    );
    assert_matches!(
        outcome,
        GestureOutcome::ConnectionDragStarted { detached: Some(_), .. }
    );
    assert_matches!(gestures.state(), GestureState::DraggingConnection { .. });
    assert_eq!(gestures.detached(), Some(&original));

    let target = anchor_point(&store, &spare, AnchorKind::Input);
    gestures.handle(PointerEvent::moved(target), &mut store, &geometry);
    let outcome = gestures.handle(PointerEvent::up(target), &mut store, &geometry);

    assert_matches!(
        outcome,
        GestureOutcome::Connected { replaced: Some(ref old), .. } if *old == original
    );
    assert!(store.connection(&original).is_none());
    assert!(store.incoming(&ids[2]).is_empty());
    let moved = store.incoming(&spare);
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].source_node, ids[1]);
}

#[test]
fn reattach_then_leave_changes_nothing() {
    let (mut store, ids) = linear_workflow();
    let geometry = geometry();
    let before = store.snapshot();
    let mut gestures = GestureController::new();

    gestures.handle(
        PointerEvent::down(anchor_point(&store, &ids[1], AnchorKind::Input)).detaching(),
        &mut store,
        &geometry,
    );
    let outcome = gestures.handle(
        PointerEvent::leave(Point::new(5.0, 700.0)),
        &mut store,
        &geometry,
    );

    assert_eq!(outcome, GestureOutcome::Cancelled);
    assert_eq!(store.snapshot(), before);
}
