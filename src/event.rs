use crate::{AnchorKind, ConnectionId, NodeId, NodeKind, Point};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A graph event with timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEvent {
    pub timestamp: DateTime<Utc>,
    pub event: EventType,
}

impl GraphEvent {
    /// Create a new event with the current timestamp
    pub fn new(event: EventType) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Types of events that can occur in the graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EventType {
    NodeAdded {
        id: NodeId,
        kind: NodeKind,
        position: Point,
    },

    /// Position changed; `dirty` lists every incident connection whose
    /// geometry must be recomputed
    NodeMoved {
        id: NodeId,
        position: Point,
        dirty: Vec<ConnectionId>,
    },

    NodeConfigChanged {
        id: NodeId,
        key: String,
        value: serde_json::Value,
    },

    NodeRemoved {
        id: NodeId,
        cascaded: Vec<ConnectionId>,
    },

    ConnectionAdded {
        id: ConnectionId,
        source: (NodeId, AnchorKind),
        target: (NodeId, AnchorKind),
    },

    ConnectionRemoved {
        id: ConnectionId,
    },

    /// The whole graph was swapped (new or loaded workflow)
    GraphReplaced {
        nodes: usize,
        connections: usize,
    },
}
