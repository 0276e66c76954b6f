use crate::NodeId;
use serde::{Deserialize, Serialize};

/// Opaque connection identifier, e.g. `conn-2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ConnectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node's attachment point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    Input,
    Output,
}

impl AnchorKind {
    pub fn opposite(&self) -> AnchorKind {
        match self {
            AnchorKind::Input => AnchorKind::Output,
            AnchorKind::Output => AnchorKind::Input,
        }
    }
}

impl std::fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnchorKind::Input => f.write_str("input"),
            AnchorKind::Output => f.write_str("output"),
        }
    }
}

/// The tuple that must be unique across stored connections
pub type ConnectionKey = (NodeId, AnchorKind, NodeId, AnchorKind);

/// Directed wire between one node's anchor and another's
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Connection {
    pub id: ConnectionId,

    /// Node the gesture started from
    pub source_node: NodeId,
    pub source_anchor: AnchorKind,

    /// Node the gesture ended on
    pub target_node: NodeId,
    pub target_anchor: AnchorKind,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        source_node: NodeId,
        source_anchor: AnchorKind,
        target_node: NodeId,
        target_anchor: AnchorKind,
    ) -> Self {
        Self {
            id,
            source_node,
            source_anchor,
            target_node,
            target_anchor,
        }
    }

    /// Check if this connection touches a given node
    pub fn involves(&self, node: &NodeId) -> bool {
        &self.source_node == node || &self.target_node == node
    }

    pub fn key(&self) -> ConnectionKey {
        (
            self.source_node.clone(),
            self.source_anchor,
            self.target_node.clone(),
            self.target_anchor,
        )
    }

    /// `(upstream, downstream)`: data leaves through the output anchor
    pub fn flow(&self) -> (&NodeId, &NodeId) {
        match self.source_anchor {
            AnchorKind::Output => (&self.source_node, &self.target_node),
            AnchorKind::Input => (&self.target_node, &self.source_node),
        }
    }

    /// The end opposite to `node`'s end, as `(node, anchor)`
    pub fn other_end(&self, node: &NodeId, anchor: AnchorKind) -> Option<(&NodeId, AnchorKind)> {
        if &self.source_node == node && self.source_anchor == anchor {
            Some((&self.target_node, self.target_anchor))
        } else if &self.target_node == node && self.target_anchor == anchor {
            Some((&self.source_node, self.source_anchor))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(source_anchor: AnchorKind, target_anchor: AnchorKind) -> Connection {
        Connection::new(
            ConnectionId::from("conn-1"),
            NodeId::from("node-1"),
            source_anchor,
            NodeId::from("node-2"),
            target_anchor,
        )
    }

    #[test]
    fn test_connection_involves() {
        let conn = wire(AnchorKind::Output, AnchorKind::Input);

        assert!(conn.involves(&NodeId::from("node-1")));
        assert!(conn.involves(&NodeId::from("node-2")));
        assert!(!conn.involves(&NodeId::from("node-3")));
    }

    #[test]
    fn test_flow_follows_output_anchor() {
        let forward = wire(AnchorKind::Output, AnchorKind::Input);
        assert_eq!(
            forward.flow(),
            (&NodeId::from("node-1"), &NodeId::from("node-2"))
        );

        // Dragged from an input back to an output
        let backward = wire(AnchorKind::Input, AnchorKind::Output);
        assert_eq!(
            backward.flow(),
            (&NodeId::from("node-2"), &NodeId::from("node-1"))
        );
    }

    #[test]
    fn test_other_end() {
        let conn = wire(AnchorKind::Output, AnchorKind::Input);
        assert_eq!(
            conn.other_end(&NodeId::from("node-2"), AnchorKind::Input),
            Some((&NodeId::from("node-1"), AnchorKind::Output))
        );
        assert_eq!(conn.other_end(&NodeId::from("node-2"), AnchorKind::Output), None);
    }

    #[test]
    fn test_anchor_opposite() {
        assert_eq!(AnchorKind::Input.opposite(), AnchorKind::Output);
        assert_eq!(AnchorKind::Output.opposite(), AnchorKind::Input);
    }
}
