//! Timer-driven simulated run with visual feedback.
//!
//! No threads and no blocking waits: the UI calls [`RunController::advance`]
//! from its event loop and gets back whatever signals have come due. Node `i`
//! of a plan lights up at `i * settle_delay` after the start, goes dark after
//! `highlight_duration`, and the run completes at `n * settle_delay`.

use crate::activation::{Activation, NodeActivator};
use crate::{ExecutionPlan, Graph, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use ulid::Ulid;

pub type RunId = Ulid;

/// What to do when a node fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the run at the failing node
    #[default]
    Halt,
    /// Record the failure and keep going
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTiming {
    pub settle_delay: Duration,
    pub highlight_duration: Duration,
}

impl Default for RunTiming {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(800),
            highlight_duration: Duration::from_millis(500),
        }
    }
}

/// Run status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    NotStarted,
    Running,
    Completed,
    Halted,
    Cancelled,
}

/// Feedback emitted while a run advances
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSignal {
    /// Node lit up
    Activated { run: RunId, node: NodeId },
    /// Node highlight cleared, with its outcome
    Settled {
        run: RunId,
        node: NodeId,
        outcome: Activation,
    },
    Completed {
        run: RunId,
        succeeded: usize,
        failed: usize,
    },
    Halted {
        run: RunId,
        node: NodeId,
        reason: String,
    },
    Cancelled { run: RunId },
}

/// Single run log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLogEntry {
    pub step: usize,
    pub node_id: NodeId,
    pub title: String,
    pub outcome: Activation,
}

/// Complete run report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub id: RunId,
    pub status: RunStatus,
    pub log: Vec<RunLogEntry>,
    pub succeeded: usize,
    pub failed: usize,
}

struct ActiveRun {
    id: RunId,
    started_at: Instant,
    /// Nodes in plan order, captured at start
    steps: Vec<Node>,
    next_index: usize,
    /// Lit node index and when its highlight clears
    lit: Option<(usize, Instant)>,
    /// Set once a failure under `Halt` settles
    halt_at: Option<(Instant, NodeId, String)>,
    status: RunStatus,
    log: Vec<RunLogEntry>,
}

impl ActiveRun {
    fn activation_deadline(&self, index: usize, timing: &RunTiming) -> Instant {
        self.started_at + timing.settle_delay * index as u32
    }

    fn report(&self) -> RunReport {
        let failed = self.log.iter().filter(|e| !e.outcome.is_success()).count();
        RunReport {
            id: self.id,
            status: self.status,
            log: self.log.clone(),
            succeeded: self.log.len() - failed,
            failed,
        }
    }
}

enum Step {
    Activate,
    Settle,
    Halt,
    Complete,
}

/// Drives at most one simulated run at a time
pub struct RunController {
    timing: RunTiming,
    policy: FailurePolicy,
    current: Option<ActiveRun>,
    /// Signals produced outside `advance` (cancellations), drained first
    outbox: Vec<RunSignal>,
}

impl RunController {
    pub fn new(timing: RunTiming, policy: FailurePolicy) -> Self {
        Self {
            timing,
            policy,
            current: None,
            outbox: Vec::new(),
        }
    }

    /// Begin playing a plan. An in-flight run is cancelled first.
    pub fn start(&mut self, plan: &ExecutionPlan, graph: &Graph, now: Instant) -> RunId {
        self.cancel();

        let steps: Vec<Node> = plan
            .order
            .iter()
            .filter_map(|id| graph.node(id).cloned())
            .collect();
        let id = Ulid::new();

        info!(run = %id, nodes = steps.len(), entry = %plan.entry, "run started");
        self.current = Some(ActiveRun {
            id,
            started_at: now,
            steps,
            next_index: 0,
            lit: None,
            halt_at: None,
            status: RunStatus::Running,
            log: Vec::new(),
        });
        id
    }

    /// Stop the in-flight run, if any. Returns whether one was stopped.
    pub fn cancel(&mut self) -> bool {
        let Some(run) = self.current.as_mut() else {
            return false;
        };
        if run.status != RunStatus::Running {
            return false;
        }
        run.status = RunStatus::Cancelled;
        run.lit = None;
        info!(run = %run.id, "run cancelled");
        self.outbox.push(RunSignal::Cancelled { run: run.id });
        true
    }

    pub fn is_running(&self) -> bool {
        self.status() == RunStatus::Running
    }

    pub fn status(&self) -> RunStatus {
        self.current
            .as_ref()
            .map_or(RunStatus::NotStarted, |run| run.status)
    }

    pub fn current_run(&self) -> Option<RunId> {
        self.current.as_ref().map(|run| run.id)
    }

    /// Node currently lit up
    pub fn highlighted(&self) -> Option<&NodeId> {
        let run = self.current.as_ref()?;
        let (index, _) = run.lit?;
        run.steps.get(index).map(|n| &n.id)
    }

    /// When the next signal falls due, for scheduling a wake-up
    pub fn next_deadline(&self) -> Option<Instant> {
        let run = self.current.as_ref()?;
        self.next_step(run).map(|(deadline, _)| deadline)
    }

    pub fn report(&self) -> Option<RunReport> {
        self.current.as_ref().map(ActiveRun::report)
    }

    /// Emit every signal due at `now`, in order
    pub fn advance(&mut self, now: Instant, activator: &mut dyn NodeActivator) -> Vec<RunSignal> {
        let mut signals = std::mem::take(&mut self.outbox);

        loop {
            let Some(run) = self.current.as_ref() else {
                break;
            };
            let Some((deadline, step)) = self.next_step(run) else {
                break;
            };
            if deadline > now {
                break;
            }
            let signal = self.perform(step, deadline, activator);
            signals.extend(signal);
        }

        signals
    }

    fn next_step(&self, run: &ActiveRun) -> Option<(Instant, Step)> {
        if run.status != RunStatus::Running {
            return None;
        }

        let has_next = run.halt_at.is_none() && run.next_index < run.steps.len();

        if let Some((_, clear_at)) = run.lit {
            // The lit node always settles before the next one lights up
            let deadline = if has_next {
                clear_at.min(run.activation_deadline(run.next_index, &self.timing))
            } else {
                clear_at
            };
            return Some((deadline, Step::Settle));
        }

        if let Some((halt_at, _, _)) = &run.halt_at {
            return Some((*halt_at, Step::Halt));
        }

        if has_next {
            return Some((run.activation_deadline(run.next_index, &self.timing), Step::Activate));
        }

        Some((run.activation_deadline(run.steps.len(), &self.timing), Step::Complete))
    }

    fn perform(
        &mut self,
        step: Step,
        deadline: Instant,
        activator: &mut dyn NodeActivator,
    ) -> Option<RunSignal> {
        let policy = self.policy;
        let highlight = self.timing.highlight_duration;
        let run = self.current.as_mut()?;

        match step {
            Step::Activate => {
                let index = run.next_index;
                let node = &run.steps[index];
                let outcome = activator.activate(node);
                debug!(run = %run.id, node = %node.id, "node activated");

                run.log.push(RunLogEntry {
                    step: index + 1,
                    node_id: node.id.clone(),
                    title: node.title.clone(),
                    outcome,
                });
                let node_id = node.id.clone();
                run.next_index += 1;
                run.lit = Some((index, deadline + highlight));

                Some(RunSignal::Activated {
                    run: run.id,
                    node: node_id,
                })
            }
            Step::Settle => {
                let (index, _) = run.lit.take()?;
                let entry = run.log.iter().find(|e| e.step == index + 1)?.clone();

                if let Activation::Failed(reason) = &entry.outcome {
                    warn!(run = %run.id, node = %entry.node_id, %reason, "node failed");
                    if policy == FailurePolicy::Halt {
                        run.halt_at = Some((deadline, entry.node_id.clone(), reason.clone()));
                    }
                }

                Some(RunSignal::Settled {
                    run: run.id,
                    node: entry.node_id,
                    outcome: entry.outcome,
                })
            }
            Step::Halt => {
                let (_, node, reason) = run.halt_at.clone()?;
                run.status = RunStatus::Halted;
                info!(run = %run.id, node = %node, "run halted");
                Some(RunSignal::Halted {
                    run: run.id,
                    node,
                    reason,
                })
            }
            Step::Complete => {
                run.status = RunStatus::Completed;
                let report = run.report();
                info!(
                    run = %run.id,
                    succeeded = report.succeeded,
                    failed = report.failed,
                    "run completed"
                );
                Some(RunSignal::Completed {
                    run: run.id,
                    succeeded: report.succeeded,
                    failed: report.failed,
                })
            }
        }
    }
}

impl Default for RunController {
    fn default() -> Self {
        Self::new(RunTiming::default(), FailurePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::SimulatedActivator;
    use crate::{ExecutionPlanner, GraphStore, NodeKind};
    use assert_matches::assert_matches;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn two_node_graph() -> (Graph, ExecutionPlan) {
        let mut store = GraphStore::new();
        store.add_node_to_canvas(NodeKind::Manual, None);
        store.add_node_to_canvas(NodeKind::Slack, None);
        let graph = store.snapshot();
        let plan = ExecutionPlanner::plan(&graph).unwrap();
        (graph, plan)
    }

    #[test]
    fn test_run_timeline() {
        let (graph, plan) = two_node_graph();
        let mut runs = RunController::default();
        let mut activator = SimulatedActivator;
        let t0 = Instant::now();

        let id = runs.start(&plan, &graph, t0);

        let signals = runs.advance(t0, &mut activator);
        assert_eq!(signals.len(), 1);
        assert_matches!(&signals[0], RunSignal::Activated { node, .. } if node == &plan.order[0]);
        assert_eq!(runs.highlighted(), Some(&plan.order[0]));

        // Highlight clears at 500 ms
        assert_eq!(runs.next_deadline(), Some(t0 + ms(500)));
        let signals = runs.advance(t0 + ms(600), &mut activator);
        assert_matches!(&signals[..], [RunSignal::Settled { .. }]);
        assert_eq!(runs.highlighted(), None);

        let signals = runs.advance(t0 + ms(800), &mut activator);
        assert_matches!(
            &signals[..],
            [RunSignal::Activated { node, .. }] if node == &plan.order[1]
        );

        let signals = runs.advance(t0 + ms(1600), &mut activator);
        assert_matches!(
            &signals[..],
            [
                RunSignal::Settled { .. },
                RunSignal::Completed {
                    run,
                    succeeded: 2,
                    failed: 0
                }
            ] if *run == id
        );
        assert_eq!(runs.status(), RunStatus::Completed);
        assert_eq!(runs.next_deadline(), None);
    }

    #[test]
    fn test_advance_catches_up() {
        let (graph, plan) = two_node_graph();
        let mut runs = RunController::default();
        let t0 = Instant::now();
        runs.start(&plan, &graph, t0);

        let signals = runs.advance(t0 + ms(10_000), &mut SimulatedActivator);
        assert_eq!(signals.len(), 5);
        assert_matches!(signals.last(), Some(RunSignal::Completed { .. }));
    }

    #[test]
    fn test_restart_cancels_in_flight_run() {
        let (graph, plan) = two_node_graph();
        let mut runs = RunController::default();
        let t0 = Instant::now();

        let first = runs.start(&plan, &graph, t0);
        runs.advance(t0, &mut SimulatedActivator);

        let second = runs.start(&plan, &graph, t0 + ms(100));
        assert_ne!(first, second);

        let signals = runs.advance(t0 + ms(100), &mut SimulatedActivator);
        assert_eq!(signals[0], RunSignal::Cancelled { run: first });
        // Only the new run's signals follow
        assert!(signals[1..].iter().all(|s| !matches!(s, RunSignal::Cancelled { .. })));
        assert_matches!(&signals[1], RunSignal::Activated { run, .. } if *run == second);
    }

    #[test]
    fn test_halt_policy_stops_at_failure() {
        let mut store = GraphStore::new();
        store.add_node_to_canvas(NodeKind::Manual, None);
        let pay = store.add_node_to_canvas(NodeKind::PiPayment, None);
        store.add_node_to_canvas(NodeKind::Email, None);
        store
            .update_node_config(&pay, "amount", serde_json::json!(-1))
            .unwrap();
        let graph = store.snapshot();
        let plan = ExecutionPlanner::plan(&graph).unwrap();

        let mut runs = RunController::new(RunTiming::default(), FailurePolicy::Halt);
        let t0 = Instant::now();
        runs.start(&plan, &graph, t0);
        let signals = runs.advance(t0 + ms(10_000), &mut SimulatedActivator);

        assert_matches!(signals.last(), Some(RunSignal::Halted { node, .. }) if node == &pay);
        assert_eq!(runs.status(), RunStatus::Halted);
        let report = runs.report().unwrap();
        assert_eq!(report.log.len(), 2);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn test_continue_policy_runs_everything() {
        let mut store = GraphStore::new();
        store.add_node_to_canvas(NodeKind::Manual, None);
        let pay = store.add_node_to_canvas(NodeKind::PiPayment, None);
        store.add_node_to_canvas(NodeKind::Email, None);
        store
            .update_node_config(&pay, "amount", serde_json::json!(0))
            .unwrap();
        let graph = store.snapshot();
        let plan = ExecutionPlanner::plan(&graph).unwrap();

        let mut runs = RunController::new(RunTiming::default(), FailurePolicy::Continue);
        let t0 = Instant::now();
        runs.start(&plan, &graph, t0);
        let signals = runs.advance(t0 + ms(10_000), &mut SimulatedActivator);

        assert_matches!(
            signals.last(),
            Some(RunSignal::Completed { succeeded: 2, failed: 1, .. })
        );
    }

    #[test]
    fn test_long_highlight_settles_before_next_activation() {
        let (graph, plan) = two_node_graph();
        let timing = RunTiming {
            settle_delay: ms(100),
            highlight_duration: ms(1_000),
        };
        let mut runs = RunController::new(timing, FailurePolicy::Halt);
        let t0 = Instant::now();
        runs.start(&plan, &graph, t0);

        let signals = runs.advance(t0 + ms(100), &mut SimulatedActivator);
        assert_matches!(
            &signals[..],
            [RunSignal::Activated { .. }, RunSignal::Settled { .. }, RunSignal::Activated { .. }]
        );
    }

    #[test]
    fn test_cancel_without_run() {
        let mut runs = RunController::default();
        assert!(!runs.cancel());
        assert_eq!(runs.status(), RunStatus::NotStarted);
        assert!(runs.advance(Instant::now(), &mut SimulatedActivator).is_empty());
    }
}
