use crate::error::{RejectReason, Result};
use crate::{Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// How the planner orders nodes for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingPolicy {
    /// Every node in insertion order, beginning at the first trigger and
    /// wrapping around to nodes inserted before it
    #[default]
    InsertionOrder,

    /// Breadth-first from each trigger (in insertion order) along connection
    /// flow; nodes no trigger reaches are left out
    Dataflow,
}

/// Ordered list of nodes a run will activate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub order: Vec<NodeId>,
    /// Trigger the plan starts from
    pub entry: NodeId,
}

impl ExecutionPlan {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Derives execution order from a graph snapshot
pub struct ExecutionPlanner;

impl ExecutionPlanner {
    /// Plan with the default insertion-order policy
    pub fn plan(graph: &Graph) -> Result<ExecutionPlan> {
        Self::plan_with(graph, OrderingPolicy::default())
    }

    pub fn plan_with(graph: &Graph, policy: OrderingPolicy) -> Result<ExecutionPlan> {
        if graph.is_empty() {
            return Err(RejectReason::EmptyWorkflow.into());
        }

        let entry_index = graph
            .nodes
            .iter()
            .position(|n| n.is_trigger())
            .ok_or(RejectReason::NoTrigger)?;
        let entry = graph.nodes[entry_index].id.clone();

        let order = match policy {
            OrderingPolicy::InsertionOrder => {
                let (before, from_entry) = graph.nodes.split_at(entry_index);
                from_entry
                    .iter()
                    .chain(before)
                    .map(|n| n.id.clone())
                    .collect()
            }
            OrderingPolicy::Dataflow => Self::dataflow_order(graph),
        };

        Ok(ExecutionPlan { order, entry })
    }

    fn dataflow_order(graph: &Graph) -> Vec<NodeId> {
        let adjacency = graph.adjacency();
        let mut visited: HashSet<&NodeId> = HashSet::new();
        let mut order = Vec::new();

        for trigger in graph.triggers() {
            if !visited.insert(&trigger.id) {
                continue;
            }
            let mut queue = VecDeque::from([&trigger.id]);

            while let Some(current) = queue.pop_front() {
                order.push(current.clone());
                for &next in adjacency.get(current).into_iter().flatten() {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        order
    }
}
