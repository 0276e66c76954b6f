//! Pointer gesture state machine: node moves, connection drags and reattaching
//! an existing wire.
//!
//! Mouse, touch and pen input all arrive as [`PointerEvent`]s, so there is one
//! code path per gesture regardless of device. Only one gesture session exists
//! at a time; it always ends back in [`GestureState::Idle`].

use crate::error::{EditorError, RejectReason};
use crate::router::{ConnectionRouter, Route};
use crate::{AnchorKind, ConnectionId, GeometryAdapter, GraphStore, NodeId, Point};
use tracing::debug;

/// Input device that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerDevice {
    #[default]
    Mouse,
    Touch,
    Pen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Pointer left the window or the platform cancelled the touch
    Leave,
}

/// Device-independent pointer event in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u64,
    pub device: PointerDevice,
    pub phase: PointerPhase,
    pub position: Point,
    /// Pick up an existing wire instead of starting a new one (e.g. Alt held)
    pub detach: bool,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, position: Point) -> Self {
        Self {
            pointer_id: 0,
            device: PointerDevice::Mouse,
            phase,
            position,
            detach: false,
        }
    }

    pub fn down(position: Point) -> Self {
        Self::new(PointerPhase::Down, position)
    }

    pub fn moved(position: Point) -> Self {
        Self::new(PointerPhase::Move, position)
    }

    pub fn up(position: Point) -> Self {
        Self::new(PointerPhase::Up, position)
    }

    pub fn leave(position: Point) -> Self {
        Self::new(PointerPhase::Leave, position)
    }

    pub fn with_pointer(mut self, pointer_id: u64, device: PointerDevice) -> Self {
        self.pointer_id = pointer_id;
        self.device = device;
        self
    }

    pub fn detaching(mut self) -> Self {
        self.detach = true;
        self
    }
}

/// Current gesture session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,

    DraggingNode {
        node: NodeId,
        /// Pointer minus node top-left at press time
        pointer_offset: Point,
        pointer_id: u64,
    },

    DraggingConnection {
        origin_node: NodeId,
        origin_anchor: AnchorKind,
        /// Live pointer position, canvas space
        pointer: Point,
        pointer_id: u64,
        /// Wire picked up for reattachment; stays stored until release
        detached: Option<ConnectionId>,
    },
}

/// What a single pointer event did
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Event did not apply to the current state
    Ignored,

    NodeDragStarted {
        node: NodeId,
    },

    /// `dirty` connections need rerouting
    NodeMoved {
        node: NodeId,
        dirty: Vec<ConnectionId>,
    },

    NodeDropped {
        node: NodeId,
    },

    ConnectionDragStarted {
        origin_node: NodeId,
        origin_anchor: AnchorKind,
        detached: Option<ConnectionId>,
    },

    /// Temporary wire to redraw
    ConnectionPreview(Route),

    Connected {
        connection: ConnectionId,
        /// Wire removed because it was reattached here
        replaced: Option<ConnectionId>,
    },

    /// Released away from a compatible anchor. A detached wire dropped this
    /// way is deleted.
    ConnectionMissed {
        removed: Option<ConnectionId>,
    },

    /// Store refused the wire (e.g. duplicate); nothing changed
    ConnectionRejected {
        reason: RejectReason,
    },

    /// Session aborted, graph left as it was
    Cancelled,
}

/// What lies under a pointer
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    Anchor { node: NodeId, anchor: AnchorKind },
    Header(NodeId),
    Body(NodeId),
}

/// Finite-state gesture handler
#[derive(Debug, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Wire currently picked up for reattachment, to hide while dragging
    pub fn detached(&self) -> Option<&ConnectionId> {
        match &self.state {
            GestureState::DraggingConnection { detached, .. } => detached.as_ref(),
            _ => None,
        }
    }

    /// Drop the session without touching the graph
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Temporary wire of an active connection drag
    pub fn preview(&self, store: &GraphStore, geometry: &dyn GeometryAdapter) -> Option<Route> {
        match &self.state {
            GestureState::DraggingConnection {
                origin_node,
                origin_anchor,
                pointer,
                ..
            } => {
                let node = store.node(origin_node)?;
                let origin = geometry.anchor_center(node, *origin_anchor);
                Some(ConnectionRouter::preview(origin, *pointer))
            }
            _ => None,
        }
    }

    /// Feed one pointer event through the state machine
    pub fn handle(
        &mut self,
        event: PointerEvent,
        store: &mut GraphStore,
        geometry: &dyn GeometryAdapter,
    ) -> GestureOutcome {
        let point = geometry.canvas_bounds().to_canvas(event.position);

        if let Some(active) = self.active_pointer() {
            if active != event.pointer_id {
                return GestureOutcome::Ignored;
            }
        }

        match event.phase {
            PointerPhase::Down => self.pointer_down(event, point, store, geometry),
            PointerPhase::Move => self.pointer_move(point, store, geometry),
            PointerPhase::Up => self.pointer_up(point, store, geometry),
            PointerPhase::Leave => self.pointer_leave(),
        }
    }

    /// Pointer that owns the current session
    pub fn active_pointer(&self) -> Option<u64> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::DraggingNode { pointer_id, .. }
            | GestureState::DraggingConnection { pointer_id, .. } => Some(*pointer_id),
        }
    }

    fn pointer_down(
        &mut self,
        event: PointerEvent,
        point: Point,
        store: &GraphStore,
        geometry: &dyn GeometryAdapter,
    ) -> GestureOutcome {
        if !self.is_idle() {
            debug!("pointer down during active gesture ignored");
            return GestureOutcome::Ignored;
        }

        match hit_test(store, geometry, point) {
            Some(HitTarget::Anchor { node, anchor }) => {
                self.begin_connection(event, point, node, anchor, store)
            }
            Some(HitTarget::Header(node_id)) => {
                let Some(node) = store.node(&node_id) else {
                    return GestureOutcome::Ignored;
                };
                let pointer_offset = point - node.position;
                debug!(node = %node_id, "node drag started");
                self.state = GestureState::DraggingNode {
                    node: node_id.clone(),
                    pointer_offset,
                    pointer_id: event.pointer_id,
                };
                GestureOutcome::NodeDragStarted { node: node_id }
            }
            Some(HitTarget::Body(_)) | None => GestureOutcome::Ignored,
        }
    }

    fn begin_connection(
        &mut self,
        event: PointerEvent,
        point: Point,
        node: NodeId,
        anchor: AnchorKind,
        store: &GraphStore,
    ) -> GestureOutcome {
        let (origin_node, origin_anchor, detached) = if event.detach {
            match store.anchor_connections(&node, anchor).last() {
                Some(wire) => match wire.other_end(&node, anchor) {
                    Some((other, other_anchor)) => {
                        (other.clone(), other_anchor, Some(wire.id.clone()))
                    }
                    None => (node, anchor, None),
                },
                None => (node, anchor, None),
            }
        } else {
            (node, anchor, None)
        };

        debug!(
            node = %origin_node,
            anchor = %origin_anchor,
            detached = ?detached,
            "connection drag started"
        );
        self.state = GestureState::DraggingConnection {
            origin_node: origin_node.clone(),
            origin_anchor,
            pointer: point,
            pointer_id: event.pointer_id,
            detached: detached.clone(),
        };
        GestureOutcome::ConnectionDragStarted {
            origin_node,
            origin_anchor,
            detached,
        }
    }

    fn pointer_move(
        &mut self,
        point: Point,
        store: &mut GraphStore,
        geometry: &dyn GeometryAdapter,
    ) -> GestureOutcome {
        match &mut self.state {
            GestureState::Idle => GestureOutcome::Ignored,
            GestureState::DraggingNode {
                node,
                pointer_offset,
                ..
            } => {
                let node = node.clone();
                match store.move_node(&node, point - *pointer_offset) {
                    Ok(dirty) => GestureOutcome::NodeMoved { node, dirty },
                    Err(_) => {
                        // Node vanished mid-drag
                        self.state = GestureState::Idle;
                        GestureOutcome::Cancelled
                    }
                }
            }
            GestureState::DraggingConnection { pointer, .. } => {
                *pointer = point;
                match self.preview(store, geometry) {
                    Some(route) => GestureOutcome::ConnectionPreview(route),
                    None => {
                        self.state = GestureState::Idle;
                        GestureOutcome::Cancelled
                    }
                }
            }
        }
    }

    fn pointer_up(
        &mut self,
        point: Point,
        store: &mut GraphStore,
        geometry: &dyn GeometryAdapter,
    ) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => GestureOutcome::Ignored,
            GestureState::DraggingNode { node, .. } => {
                debug!(node = %node, "node dropped");
                GestureOutcome::NodeDropped { node }
            }
            GestureState::DraggingConnection {
                origin_node,
                origin_anchor,
                detached,
                ..
            } => {
                let target = hit_anchor(store, geometry, point, Some(&origin_node))
                    .filter(|(_, anchor)| *anchor != origin_anchor);

                match target {
                    Some((target_node, target_anchor)) => finish_connection(
                        store,
                        (&origin_node, origin_anchor),
                        (&target_node, target_anchor),
                        detached,
                    ),
                    None => {
                        let removed =
                            detached.and_then(|id| store.remove_connection(&id).map(|c| c.id));
                        debug!(node = %origin_node, removed = ?removed, "connection drag missed");
                        GestureOutcome::ConnectionMissed { removed }
                    }
                }
            }
        }
    }

    /// Every pointer left the surface at once; ends the session whichever
    /// pointer owns it
    pub fn pointer_gone(&mut self) -> GestureOutcome {
        self.pointer_leave()
    }

    fn pointer_leave(&mut self) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => GestureOutcome::Ignored,
            // Position is already applied; leaving commits it
            GestureState::DraggingNode { node, .. } => {
                debug!(node = %node, "pointer left window, node drag committed");
                GestureOutcome::NodeDropped { node }
            }
            GestureState::DraggingConnection { .. } => {
                debug!("pointer left window, connection drag cancelled");
                GestureOutcome::Cancelled
            }
        }
    }
}

fn finish_connection(
    store: &mut GraphStore,
    (origin_node, origin_anchor): (&NodeId, AnchorKind),
    (target_node, target_anchor): (&NodeId, AnchorKind),
    detached: Option<ConnectionId>,
) -> GestureOutcome {
    // Dropped back where it came from
    if let Some(old) = detached.as_ref().and_then(|id| store.connection(id)) {
        let same_place = old.other_end(origin_node, origin_anchor)
            == Some((target_node, target_anchor));
        if same_place {
            return GestureOutcome::Connected {
                connection: old.id.clone(),
                replaced: None,
            };
        }
    }

    match store.add_connection(origin_node, origin_anchor, target_node, target_anchor) {
        Ok(connection) => {
            let replaced = detached.and_then(|id| store.remove_connection(&id).map(|c| c.id));
            GestureOutcome::Connected {
                connection,
                replaced,
            }
        }
        Err(EditorError::Rejected(reason)) => {
            debug!(%reason, "connection rejected");
            GestureOutcome::ConnectionRejected { reason }
        }
        Err(err) => {
            debug!(error = %err, "connection target disappeared");
            GestureOutcome::ConnectionMissed { removed: None }
        }
    }
}

/// Anchor under `point`, skipping `exclude`'s anchors.
/// When boxes overlap the smallest one wins; ties go to the later node.
pub fn hit_anchor(
    store: &GraphStore,
    geometry: &dyn GeometryAdapter,
    point: Point,
    exclude: Option<&NodeId>,
) -> Option<(NodeId, AnchorKind)> {
    let mut best: Option<(f32, &NodeId, AnchorKind)> = None;

    for node in store.nodes() {
        if Some(&node.id) == exclude {
            continue;
        }
        for anchor in [AnchorKind::Input, AnchorKind::Output] {
            let bounds = geometry.anchor_bounds(node, anchor);
            if !bounds.contains_point(point) {
                continue;
            }
            let area = bounds.area();
            if best.map_or(true, |(best_area, _, _)| area <= best_area) {
                best = Some((area, &node.id, anchor));
            }
        }
    }

    best.map(|(_, node, anchor)| (node.clone(), anchor))
}

/// Classify what is under `point`: anchors first, then the topmost node
pub fn hit_test(
    store: &GraphStore,
    geometry: &dyn GeometryAdapter,
    point: Point,
) -> Option<HitTarget> {
    if let Some((node, anchor)) = hit_anchor(store, geometry, point, None) {
        return Some(HitTarget::Anchor { node, anchor });
    }

    let topmost = store
        .nodes()
        .filter(|n| geometry.node_bounds(n).contains_point(point))
        .last()?;

    if geometry.header_bounds(topmost).contains_point(point) {
        Some(HitTarget::Header(topmost.id.clone()))
    } else {
        Some(HitTarget::Body(topmost.id.clone()))
    }
}
