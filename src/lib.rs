// Workflow Canvas - Core Library

pub mod activation;
pub mod config;
pub mod connection;
pub mod document;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod id_generator;
pub mod node;
pub mod planner;
pub mod router;
pub mod run;
pub mod store;
pub mod ui;
pub mod validation;

// Re-export main types for convenience
pub use activation::{Activation, NodeActivator, SimulatedActivator};
pub use config::{CanvasConfig, EditorConfig, RunConfig};
pub use connection::{AnchorKind, Connection, ConnectionId, ConnectionKey};
pub use document::WorkflowDocument;
pub use editor::{ExecuteOutcome, WorkflowEditor};
pub use error::{EditorError, RejectReason};
pub use event::{EventType, GraphEvent};
pub use geometry::{CanvasBounds, GeometryAdapter, LayoutGeometry, NodeLayout, Point, Rectangle};
pub use gesture::{
    GestureController, GestureOutcome, GestureState, HitTarget, PointerDevice, PointerEvent,
    PointerPhase,
};
pub use node::{Node, NodeCategory, NodeId, NodeKind, UnknownNodeKind};
pub use planner::{ExecutionPlan, ExecutionPlanner, OrderingPolicy};
pub use router::{ConnectionRouter, Route};
pub use run::{
    FailurePolicy, RunController, RunId, RunLogEntry, RunReport, RunSignal, RunStatus, RunTiming,
};
pub use store::{Graph, GraphStore};
pub use ui::WorkflowCanvasApp;
pub use validation::{
    ValidationIssue, ValidationIssueType, ValidationResult, ValidationSeverity, Validator,
};
