use crate::error::{EditorError, RejectReason, Result};
use crate::id_generator::IdGenerator;
use crate::{
    AnchorKind, Connection, ConnectionId, ConnectionKey, EventType, GraphEvent, Node,
    NodeCategory, NodeId, NodeKind, Point,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Fallback drop position used when `add_node_to_canvas` gets no coordinates
pub const DEFAULT_DROP_POSITION: Point = Point::new(100.0, 100.0);

/// Owned, immutable copy of a workflow graph in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl Graph {
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Trigger nodes in insertion order
    pub fn triggers(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_trigger())
    }

    /// Downstream neighbours of every node along connection flow, in connection order
    pub fn adjacency(&self) -> HashMap<&NodeId, Vec<&NodeId>> {
        let mut adjacency: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
        for connection in &self.connections {
            let (from, to) = connection.flow();
            adjacency.entry(from).or_default().push(to);
        }
        adjacency
    }
}

/// Sole owner and mutator of the nodes and connections of one editing session
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// All nodes indexed by ID
    nodes: HashMap<NodeId, Node>,

    /// Insertion order of nodes
    node_order: Vec<NodeId>,

    /// All connections indexed by ID
    connections: HashMap<ConnectionId, Connection>,

    /// Insertion order of connections
    connection_order: Vec<ConnectionId>,

    node_ids: IdGenerator,
    connection_ids: IdGenerator,

    /// Where `add_node_to_canvas` places nodes without coordinates
    drop_fallback: Point,

    /// Event log for history tracking
    events: Vec<GraphEvent>,
}

impl GraphStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::with_drop_fallback(DEFAULT_DROP_POSITION)
    }

    pub fn with_drop_fallback(drop_fallback: Point) -> Self {
        Self {
            nodes: HashMap::new(),
            node_order: Vec::new(),
            connections: HashMap::new(),
            connection_order: Vec::new(),
            node_ids: IdGenerator::nodes(),
            connection_ids: IdGenerator::connections(),
            drop_fallback,
            events: Vec::new(),
        }
    }

    // ========== Node Operations ==========

    /// Insert a node under a freshly allocated id
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        category: NodeCategory,
        title: impl Into<String>,
        position: Point,
    ) -> NodeId {
        let id = NodeId::from(self.node_ids.next());
        let node = Node::with_details(id.clone(), kind, category, title, position);

        debug!(node = %id, kind = %kind, x = position.x, y = position.y, "node added");
        self.log_event(EventType::NodeAdded {
            id: id.clone(),
            kind,
            position,
        });

        self.nodes.insert(id.clone(), node);
        self.node_order.push(id.clone());
        id
    }

    /// Palette entry point: category and title come from the kind
    pub fn add_node_to_canvas(&mut self, kind: NodeKind, position: Option<Point>) -> NodeId {
        let position = position.unwrap_or(self.drop_fallback);
        self.add_node(kind, kind.category(), kind.title(), position)
    }

    /// Get a node by ID
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_order
    }

    /// Move a node. Returns the incident connections whose geometry is now dirty.
    pub fn move_node(&mut self, id: &NodeId, position: Point) -> Result<Vec<ConnectionId>> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| EditorError::NodeNotFound(id.clone()))?;
        node.position = position;

        let dirty: Vec<ConnectionId> = self
            .incident_connections(id)
            .into_iter()
            .map(|c| c.id.clone())
            .collect();

        self.log_event(EventType::NodeMoved {
            id: id.clone(),
            position,
            dirty: dirty.clone(),
        });

        Ok(dirty)
    }

    /// Set one configuration entry of a node
    pub fn update_node_config(
        &mut self,
        id: &NodeId,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<()> {
        let key = key.into();
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| EditorError::NodeNotFound(id.clone()))?;
        node.config.insert(key.clone(), value.clone());

        self.log_event(EventType::NodeConfigChanged {
            id: id.clone(),
            key,
            value,
        });

        Ok(())
    }

    /// Delete a node and every connection touching it.
    /// Returns the cascaded connection ids; a missing node is a no-op.
    pub fn remove_node(&mut self, id: &NodeId) -> Vec<ConnectionId> {
        if self.nodes.remove(id).is_none() {
            debug!(node = %id, "remove_node on missing node ignored");
            return Vec::new();
        }
        self.node_order.retain(|n| n != id);

        let cascaded: Vec<ConnectionId> = self
            .connection_order
            .iter()
            .filter(|cid| self.connections.get(*cid).is_some_and(|c| c.involves(id)))
            .cloned()
            .collect();

        for cid in &cascaded {
            self.remove_connection(cid);
        }

        debug!(node = %id, cascaded = cascaded.len(), "node removed");
        self.log_event(EventType::NodeRemoved {
            id: id.clone(),
            cascaded: cascaded.clone(),
        });

        cascaded
    }

    // ========== Connection Operations ==========

    /// Wire two anchors together
    pub fn add_connection(
        &mut self,
        source: &NodeId,
        source_anchor: AnchorKind,
        target: &NodeId,
        target_anchor: AnchorKind,
    ) -> Result<ConnectionId> {
        if source == target {
            return Err(RejectReason::SelfLoop.into());
        }
        if source_anchor == target_anchor {
            return Err(RejectReason::SameAnchorKind.into());
        }
        if !self.nodes.contains_key(source) {
            return Err(EditorError::NodeNotFound(source.clone()));
        }
        if !self.nodes.contains_key(target) {
            return Err(EditorError::NodeNotFound(target.clone()));
        }

        // Either drawing direction of the same wire counts as a repeat
        let (upstream, downstream) = match source_anchor {
            AnchorKind::Output => (source, target),
            AnchorKind::Input => (target, source),
        };
        if self.find_wire(upstream, downstream).is_some() {
            return Err(RejectReason::Duplicate.into());
        }

        let id = ConnectionId::from(self.connection_ids.next());
        let connection = Connection::new(
            id.clone(),
            source.clone(),
            source_anchor,
            target.clone(),
            target_anchor,
        );

        debug!(connection = %id, from = %source, to = %target, "connection added");
        self.log_event(EventType::ConnectionAdded {
            id: id.clone(),
            source: (source.clone(), source_anchor),
            target: (target.clone(), target_anchor),
        });

        self.connections.insert(id.clone(), connection);
        self.connection_order.push(id.clone());
        Ok(id)
    }

    /// Delete a connection; a missing id is a no-op
    pub fn remove_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        let removed = self.connections.remove(id)?;
        self.connection_order.retain(|c| c != id);

        self.log_event(EventType::ConnectionRemoved { id: id.clone() });
        Some(removed)
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// All connections in insertion order
    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connection_order
            .iter()
            .filter_map(|id| self.connections.get(id))
    }

    /// Look up a connection by its unique tuple
    pub fn find_connection(&self, key: &ConnectionKey) -> Option<&Connection> {
        self.connections().find(|c| &c.key() == key)
    }

    /// Look up the connection carrying data from `upstream` to `downstream`
    pub fn find_wire(&self, upstream: &NodeId, downstream: &NodeId) -> Option<&Connection> {
        self.connections()
            .find(|c| c.flow() == (upstream, downstream))
    }

    /// All connections touching a node, in insertion order
    pub fn incident_connections(&self, node: &NodeId) -> Vec<&Connection> {
        self.connections().filter(|c| c.involves(node)).collect()
    }

    /// Connections attached to one specific anchor of a node
    pub fn anchor_connections(&self, node: &NodeId, anchor: AnchorKind) -> Vec<&Connection> {
        self.connections()
            .filter(|c| c.other_end(node, anchor).is_some())
            .collect()
    }

    /// Connections carrying data out of a node
    pub fn outgoing(&self, node: &NodeId) -> Vec<&Connection> {
        self.connections().filter(|c| c.flow().0 == node).collect()
    }

    /// Connections carrying data into a node
    pub fn incoming(&self, node: &NodeId) -> Vec<&Connection> {
        self.connections().filter(|c| c.flow().1 == node).collect()
    }

    // ========== Whole-graph Operations ==========

    /// Owned copy of the current graph
    pub fn snapshot(&self) -> Graph {
        Graph {
            nodes: self.nodes().cloned().collect(),
            connections: self.connections().cloned().collect(),
        }
    }

    /// Start a new, empty workflow
    pub fn clear(&mut self) {
        self.replace(Graph::default());
        self.node_ids.reset();
        self.connection_ids.reset();
    }

    /// Swap in a different workflow wholesale.
    ///
    /// Duplicate node ids keep the first occurrence. Connections that
    /// reference missing nodes, loop on one node, pair equal anchors or
    /// repeat an existing tuple are dropped.
    pub fn replace(&mut self, graph: Graph) {
        self.nodes.clear();
        self.node_order.clear();
        self.connections.clear();
        self.connection_order.clear();
        self.events.clear();

        for node in graph.nodes {
            if self.nodes.contains_key(&node.id) {
                warn!(node = %node.id, "duplicate node id in loaded workflow dropped");
                continue;
            }
            self.node_order.push(node.id.clone());
            self.nodes.insert(node.id.clone(), node);
        }

        let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
        for conn in graph.connections {
            let endpoints_exist = self.nodes.contains_key(&conn.source_node)
                && self.nodes.contains_key(&conn.target_node);
            let well_formed = conn.source_node != conn.target_node
                && conn.source_anchor != conn.target_anchor;

            if !endpoints_exist || !well_formed || self.connections.contains_key(&conn.id) {
                warn!(connection = %conn.id, "invalid connection in loaded workflow dropped");
                continue;
            }
            let (upstream, downstream) = conn.flow();
            if !seen.insert((upstream.clone(), downstream.clone())) {
                warn!(connection = %conn.id, "duplicate connection in loaded workflow dropped");
                continue;
            }
            self.connection_order.push(conn.id.clone());
            self.connections.insert(conn.id.clone(), conn);
        }

        self.node_ids
            .resume_after(self.node_order.iter().map(NodeId::as_str));
        self.connection_ids
            .resume_after(self.connection_order.iter().map(ConnectionId::as_str));

        self.log_event(EventType::GraphReplaced {
            nodes: self.nodes.len(),
            connections: self.connections.len(),
        });
    }

    // ========== Event Logging ==========

    /// Log an event. Consecutive moves of one node collapse into the latest.
    fn log_event(&mut self, event: EventType) {
        let repeated_move = matches!(
            (&event, self.events.last()),
            (
                EventType::NodeMoved { id, .. },
                Some(GraphEvent {
                    event: EventType::NodeMoved { id: last, .. },
                    ..
                }),
            ) if id == last
        );
        if repeated_move {
            self.events.pop();
        }
        self.events.push(GraphEvent::new(event));
    }

    /// Get all events
    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    /// Clear event log
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // ========== Utility Methods ==========

    /// Count nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Count connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn drop_fallback(&self) -> Point {
        self.drop_fallback
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
