// src/graph/resolver.rs

//! Readiness queries over a snapshot.

use std::collections::HashSet;

use tracing::warn;

use crate::graph::node::TaskNode;
use crate::graph::snapshot::TaskGraph;
use crate::types::{TaskId, TaskStatus};

/// Tasks that are `pending` and whose dependencies are all `completed`.
///
/// Results keep graph order.
pub fn unblocked(graph: &TaskGraph) -> Vec<&TaskNode> {
    let completed = graph.completed_ids();
    graph
        .tasks()
        .iter()
        .filter(|task| task.status == TaskStatus::Pending && deps_within(task, &completed))
        .collect()
}

/// Whether every dependency of `task` is in `completed`.
pub fn deps_within(task: &TaskNode, completed: &HashSet<&str>) -> bool {
    task.dependencies
        .iter()
        .all(|dep| completed.contains(dep.as_str()))
}

/// Dependencies of `task` that are not yet `completed`, in declaration order.
///
/// A dependency missing from the graph counts as unmet.
pub fn unmet_dependencies(graph: &TaskGraph, task: &TaskNode) -> Vec<TaskId> {
    task.dependencies
        .iter()
        .filter(|dep| match graph.get(dep) {
            Some(upstream) => upstream.status != TaskStatus::Completed,
            None => {
                warn!(task = %task.id, dep = %dep, "dependency missing from graph");
                true
            }
        })
        .cloned()
        .collect()
}
