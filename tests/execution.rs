mod fixtures;

use assert_matches::assert_matches;
use fixtures::sample_workflows::linear_workflow;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::{Duration, Instant};
use workflow_canvas::{
    Activation, AnchorKind, EditorConfig, EditorError, ExecutionPlanner, FailurePolicy, Graph,
    GraphStore, NodeKind, OrderingPolicy, RejectReason, RunSignal, RunStatus, WorkflowDocument,
    WorkflowEditor,
};

const STEP: Duration = Duration::from_millis(800);

#[test]
fn empty_and_triggerless_graphs_are_rejected() {
    assert_matches!(
        ExecutionPlanner::plan(&Graph::default()),
        Err(EditorError::Rejected(RejectReason::EmptyWorkflow))
    );

    let mut store = GraphStore::new();
    store.add_node_to_canvas(NodeKind::Http, None);
    assert_matches!(
        ExecutionPlanner::plan(&store.snapshot()),
        Err(EditorError::Rejected(RejectReason::NoTrigger))
    );
}

#[test]
fn trigger_then_action_plans_in_order() {
    let mut store = GraphStore::new();
    let a = store.add_node_to_canvas(NodeKind::Schedule, None);
    let b = store.add_node_to_canvas(NodeKind::Slack, None);
    store
        .add_connection(&a, AnchorKind::Output, &b, AnchorKind::Input)
        .unwrap();

    for policy in [OrderingPolicy::InsertionOrder, OrderingPolicy::Dataflow] {
        let plan = ExecutionPlanner::plan_with(&store.snapshot(), policy).unwrap();
        assert_eq!(plan.order, vec![a.clone(), b.clone()]);
    }
}

#[test]
fn disconnected_triggers_both_planned() {
    let mut store = GraphStore::new();
    let a = store.add_node_to_canvas(NodeKind::Manual, None);
    let b = store.add_node_to_canvas(NodeKind::Webhook, None);

    let plan = ExecutionPlanner::plan(&store.snapshot()).unwrap();
    assert_eq!(plan.order, vec![a.clone(), b]);
    assert_eq!(plan.entry, a);
}

#[test]
fn run_plays_each_node_on_schedule() {
    let (store, ids) = linear_workflow();
    let mut editor = WorkflowEditor::default();
    editor.load(WorkflowDocument::from_store(&store, "Linear"));

    let start = Instant::now();
    let outcome = editor.execute_workflow(start).unwrap();
    assert_eq!(
        outcome.to_string(),
        "Executing workflow with 3 nodes starting with Webhook Trigger"
    );

    let signals = editor.tick(start);
    assert_matches!(signals.as_slice(), [RunSignal::Activated { node, .. }] if *node == ids[0]);
    assert_eq!(editor.highlighted(), Some(&ids[0]));

    // Highlight clears after 500ms, before the next node lights up
    let signals = editor.tick(start + Duration::from_millis(500));
    assert_matches!(
        signals.as_slice(),
        [RunSignal::Settled { outcome, .. }] if outcome.is_success()
    );
    assert_eq!(editor.highlighted(), None);

    let signals = editor.tick(start + STEP);
    assert_matches!(signals.as_slice(), [RunSignal::Activated { node, .. }] if *node == ids[1]);

    let signals = editor.tick(start + STEP * 3);
    assert_eq!(signals.len(), 4);
    assert_matches!(
        signals.last(),
        Some(RunSignal::Completed {
            succeeded: 3,
            failed: 0,
            ..
        })
    );
    assert_eq!(editor.runs().status(), RunStatus::Completed);
    assert_eq!(editor.runs().next_deadline(), None);

    let report = editor.runs().report().unwrap();
    let titles: Vec<_> = report.log.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Webhook Trigger", "HTTP Request", "Slack"]);
}

#[test]
fn restarting_cancels_previous_run() {
    let (store, _) = linear_workflow();
    let mut editor = WorkflowEditor::default();
    editor.load(WorkflowDocument::from_store(&store, "Linear"));

    let start = Instant::now();
    let first = editor.execute_workflow(start).unwrap().run;
    editor.tick(start);
    let second = editor.execute_workflow(start + STEP).unwrap().run;
    assert_ne!(first, second);

    let signals = editor.tick(start + STEP);
    assert_matches!(signals.first(), Some(RunSignal::Cancelled { run }) if *run == first);
    assert_matches!(signals.get(1), Some(RunSignal::Activated { run, .. }) if *run == second);
}

fn failing_payment_editor(policy: FailurePolicy) -> WorkflowEditor {
    let mut config = EditorConfig::default();
    config.run.failure_policy = policy;
    let mut editor = WorkflowEditor::new(config);

    editor.add_node_to_canvas(NodeKind::Manual, None);
    let payment = editor.add_node_to_canvas(NodeKind::PiPayment, None);
    editor.add_node_to_canvas(NodeKind::Noop, None);
    editor
        .store_mut()
        .update_node_config(&payment, "amount", json!(-2))
        .unwrap();
    editor
}

#[test]
fn halt_policy_stops_at_failure() {
    let mut editor = failing_payment_editor(FailurePolicy::Halt);
    let start = Instant::now();
    editor.execute_workflow(start).unwrap();

    let signals = editor.tick(start + STEP * 10);
    assert_matches!(
        signals.last(),
        Some(RunSignal::Halted { reason, .. }) if reason == "Pi payment amount must be positive"
    );
    assert_eq!(editor.runs().status(), RunStatus::Halted);
    assert_eq!(editor.runs().report().unwrap().log.len(), 2);
}

#[test]
fn continue_policy_records_failure_and_finishes() {
    let mut editor = failing_payment_editor(FailurePolicy::Continue);
    let start = Instant::now();
    editor.execute_workflow(start).unwrap();

    let signals = editor.tick(start + STEP * 10);
    assert_matches!(
        signals.last(),
        Some(RunSignal::Completed {
            succeeded: 2,
            failed: 1,
            ..
        })
    );
    let report = editor.runs().report().unwrap();
    assert_eq!(
        report.log[1].outcome,
        Activation::Failed("Pi payment amount must be positive".into())
    );
}

#[test]
fn custom_activator_is_used() {
    struct Recording(Vec<String>);

    impl workflow_canvas::NodeActivator for Recording {
        fn activate(&mut self, node: &workflow_canvas::Node) -> Activation {
            self.0.push(node.id.to_string());
            Activation::Succeeded(String::new())
        }
    }

    let mut editor =
        WorkflowEditor::with_activator(EditorConfig::default(), Box::new(Recording(Vec::new())));
    editor.add_node_to_canvas(NodeKind::Manual, None);
    let start = Instant::now();
    editor.execute_workflow(start).unwrap();

    let signals = editor.tick(start + STEP);
    assert_matches!(signals.last(), Some(RunSignal::Completed { succeeded: 1, .. }));
}
