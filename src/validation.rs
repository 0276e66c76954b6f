use crate::{Graph, GraphStore, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Info,    // informational
    Warning, // potential issue
    Error,   // blocks execution
}

/// Validation issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
    pub affected_nodes: Vec<NodeId>,
    pub issue_type: ValidationIssueType,
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssueType {
    EmptyWorkflow,
    NoTrigger,
    Cycle,
    UnreachableNode,
}

/// Complete validation result
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn with_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Error)
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Warning)
    }

    pub fn info(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Info)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings().is_empty()
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Highest severity per node, for badges on the canvas
    pub fn nodes_with_issues(&self) -> HashMap<NodeId, ValidationSeverity> {
        let mut nodes = HashMap::new();
        for issue in &self.issues {
            for id in &issue.affected_nodes {
                nodes
                    .entry(id.clone())
                    .and_modify(|severity| {
                        if issue.severity > *severity {
                            *severity = issue.severity;
                        }
                    })
                    .or_insert(issue.severity);
            }
        }
        nodes
    }
}

/// Validator for workflow graphs
pub struct Validator;

impl Validator {
    pub fn validate_store(store: &GraphStore) -> ValidationResult {
        Self::validate(&store.snapshot())
    }

    /// Run all validations on a graph
    pub fn validate(graph: &Graph) -> ValidationResult {
        let mut result = ValidationResult::new();

        if graph.is_empty() {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Error,
                message: "Workflow has no nodes.".to_string(),
                affected_nodes: vec![],
                issue_type: ValidationIssueType::EmptyWorkflow,
            });
            return result;
        }

        if graph.triggers().next().is_none() {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Error,
                message: "No trigger node. Execution cannot begin.".to_string(),
                affected_nodes: vec![],
                issue_type: ValidationIssueType::NoTrigger,
            });
        }

        if let Some(cycle) = Self::detect_cycle(graph) {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Warning,
                message: format!(
                    "Cycle detected in connection graph involving {} nodes.",
                    cycle.len()
                ),
                affected_nodes: cycle,
                issue_type: ValidationIssueType::Cycle,
            });
        }

        let unreachable = Self::unreachable_nodes(graph);
        if !unreachable.is_empty() && graph.triggers().next().is_some() {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Info,
                message: format!(
                    "{} node(s) are not reachable from any trigger.",
                    unreachable.len()
                ),
                affected_nodes: unreachable,
                issue_type: ValidationIssueType::UnreachableNode,
            });
        }

        result
    }

    /// Detect a cycle along connection flow using an iterative DFS; returns the nodes on it
    fn detect_cycle(graph: &Graph) -> Option<Vec<NodeId>> {
        let adjacency = graph.adjacency();
        let mut visited: HashSet<&NodeId> = HashSet::new();

        for node in &graph.nodes {
            if !visited.insert(&node.id) {
                continue;
            }

            // Current path with the index of the next edge to follow from each entry
            let mut path: Vec<(&NodeId, usize)> = vec![(&node.id, 0)];
            let mut on_path: HashMap<&NodeId, usize> = HashMap::from([(&node.id, 0)]);

            while let Some(&(id, edge)) = path.last() {
                match adjacency.get(id).and_then(|next| next.get(edge)) {
                    Some(&next) => {
                        let top = path.len() - 1;
                        path[top].1 += 1;

                        if let Some(&pos) = on_path.get(next) {
                            return Some(path[pos..].iter().map(|(n, _)| (*n).clone()).collect());
                        }
                        if visited.insert(next) {
                            on_path.insert(next, path.len());
                            path.push((next, 0));
                        }
                    }
                    None => {
                        path.pop();
                        on_path.remove(id);
                    }
                }
            }
        }

        None
    }

    /// Nodes no trigger reaches along connection flow (triggers themselves count as reached)
    fn unreachable_nodes(graph: &Graph) -> Vec<NodeId> {
        let adjacency = graph.adjacency();
        let mut reachable: HashSet<&NodeId> = HashSet::new();
        let mut queue: Vec<&NodeId> = graph.triggers().map(|n| &n.id).collect();

        while let Some(id) = queue.pop() {
            if !reachable.insert(id) {
                continue;
            }
            if let Some(next) = adjacency.get(id) {
                queue.extend(next);
            }
        }

        graph
            .nodes
            .iter()
            .filter(|n| !reachable.contains(&n.id))
            .map(|n| n.id.clone())
            .collect()
    }
}
