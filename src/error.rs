use crate::{ConnectionId, NodeId};
use thiserror::Error;

/// Why an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Source and target are the same node
    SelfLoop,
    /// Both ends use the same anchor kind (output must pair with input)
    SameAnchorKind,
    /// An identical connection already exists
    Duplicate,
    /// The workflow has no nodes at all
    EmptyWorkflow,
    /// The workflow has nodes but none of category trigger
    NoTrigger,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::SelfLoop => "a node cannot connect to itself",
            RejectReason::SameAnchorKind => "an output must connect to an input",
            RejectReason::Duplicate => "connection already exists",
            RejectReason::EmptyWorkflow => "Please add at least one node to the workflow",
            RejectReason::NoTrigger => "Please add a trigger node to start the workflow",
        };
        f.write_str(text)
    }
}

/// Errors produced by the editor core. All of them are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(ConnectionId),

    #[error("{0}")]
    Rejected(RejectReason),
}

impl EditorError {
    /// True for the `NodeNotFound` / `ConnectionNotFound` family
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EditorError::NodeNotFound(_) | EditorError::ConnectionNotFound(_)
        )
    }

    /// The rejection reason, if this is a rejection
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            EditorError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<RejectReason> for EditorError {
    fn from(reason: RejectReason) -> Self {
        EditorError::Rejected(reason)
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
