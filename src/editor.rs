use crate::activation::{NodeActivator, SimulatedActivator};
use crate::config::EditorConfig;
use crate::document::WorkflowDocument;
use crate::error::{EditorError, Result};
use crate::gesture::{GestureController, GestureOutcome, PointerEvent};
use crate::planner::{ExecutionPlan, ExecutionPlanner};
use crate::run::{RunController, RunId, RunSignal};
use crate::validation::{ValidationResult, Validator};
use crate::{
    CanvasBounds, ConnectionId, Graph, GeometryAdapter, GraphStore, LayoutGeometry, NodeId,
    NodeKind, Point,
};
use std::fmt;
use std::time::Instant;
use tracing::info;

pub const DEFAULT_WORKFLOW_NAME: &str = "New Workflow";

/// A run that was accepted by `execute_workflow`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOutcome {
    pub run: RunId,
    pub plan: ExecutionPlan,
    /// Title of the trigger the run starts from
    pub entry_title: String,
}

impl fmt::Display for ExecuteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Executing workflow with {} nodes starting with {}",
            self.plan.len(),
            self.entry_title
        )
    }
}

/// One editing session: the graph plus everything acting on it
pub struct WorkflowEditor {
    config: EditorConfig,
    store: GraphStore,
    gestures: GestureController,
    runs: RunController,
    activator: Box<dyn NodeActivator>,
    /// Metadata of the open workflow; the graph itself lives in `store`
    document: WorkflowDocument,
}

impl WorkflowEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_activator(config, Box::new(SimulatedActivator))
    }

    pub fn with_activator(config: EditorConfig, activator: Box<dyn NodeActivator>) -> Self {
        let store = GraphStore::with_drop_fallback(config.canvas.drop_fallback);
        let runs = RunController::new(config.run.timing(), config.run.failure_policy);
        Self {
            config,
            store,
            gestures: GestureController::new(),
            runs,
            activator,
            document: WorkflowDocument::new(DEFAULT_WORKFLOW_NAME),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn runs(&self) -> &RunController {
        &self.runs
    }

    pub fn workflow_name(&self) -> &str {
        &self.document.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.document.name = name.into();
        self.document.touch();
    }

    /// Geometry from the configured node layout over the given canvas
    pub fn layout_geometry(&self, canvas: CanvasBounds) -> LayoutGeometry {
        LayoutGeometry::new(self.config.canvas.layout, canvas)
    }

    /// Palette drop. Without a position the configured fallback is used.
    pub fn add_node_to_canvas(&mut self, kind: NodeKind, position: Option<Point>) -> NodeId {
        self.store.add_node_to_canvas(kind, position)
    }

    /// Remove a node with its connections, ending any gesture that held it
    pub fn remove_node(&mut self, id: &NodeId) -> Vec<ConnectionId> {
        if !self.gestures.is_idle() {
            self.gestures.reset();
        }
        self.store.remove_node(id)
    }

    pub fn remove_connection(&mut self, id: &ConnectionId) -> Result<()> {
        self.store
            .remove_connection(id)
            .map(|_| ())
            .ok_or_else(|| EditorError::ConnectionNotFound(id.clone()))
    }

    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        geometry: &dyn GeometryAdapter,
    ) -> GestureOutcome {
        self.gestures.handle(event, &mut self.store, geometry)
    }

    /// The pointer left the canvas surface; ends any gesture in progress
    pub fn pointer_gone(&mut self) -> GestureOutcome {
        self.gestures.pointer_gone()
    }

    /// Plan the current graph and start playing it. A run already in
    /// flight is cancelled.
    pub fn execute_workflow(&mut self, now: Instant) -> Result<ExecuteOutcome> {
        let graph = self.store.snapshot();
        let plan = ExecutionPlanner::plan_with(&graph, self.config.run.ordering)?;
        let entry_title = graph
            .node(&plan.entry)
            .map(|n| n.title.clone())
            .unwrap_or_default();

        let run = self.runs.start(&plan, &graph, now);
        let outcome = ExecuteOutcome {
            run,
            plan,
            entry_title,
        };
        info!(run = %run, "{}", outcome);
        Ok(outcome)
    }

    /// Advance the active run to `now`
    pub fn tick(&mut self, now: Instant) -> Vec<RunSignal> {
        self.runs.advance(now, self.activator.as_mut())
    }

    /// Node lit by the active run
    pub fn highlighted(&self) -> Option<&NodeId> {
        self.runs.highlighted()
    }

    /// Empty canvas, fresh ids, new document
    pub fn new_workflow(&mut self) {
        self.end_session();
        self.store.clear();
        self.document = WorkflowDocument::new(DEFAULT_WORKFLOW_NAME);
        info!("new workflow");
    }

    /// Replace the open workflow with a saved one
    pub fn load(&mut self, mut document: WorkflowDocument) {
        self.end_session();
        let graph = Graph {
            nodes: std::mem::take(&mut document.nodes),
            connections: std::mem::take(&mut document.connections),
        };
        self.store.replace(graph);
        info!(
            workflow = %document.id,
            name = %document.name,
            nodes = self.store.node_count(),
            "workflow loaded"
        );
        self.document = document;
    }

    /// Current workflow as a saveable document
    pub fn document(&self) -> WorkflowDocument {
        let mut document = self.document.clone();
        document.capture(&self.store);
        document
    }

    pub fn validate(&self) -> ValidationResult {
        Validator::validate_store(&self.store)
    }

    fn end_session(&mut self) {
        self.runs.cancel();
        self.gestures.reset();
    }
}

impl Default for WorkflowEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
