// src/graph/validate.rs

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::GraphError;
use crate::graph::node::TaskNode;

/// Check referential integrity and acyclicity of a candidate task list.
///
/// Returns human-readable errors in a stable order: duplicate ids first, then
/// dangling references (in task order), then a single cycle report. An empty
/// vector means the graph is valid.
pub fn validate_tasks(tasks: &[TaskNode]) -> Vec<String> {
    let mut errors = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            errors.push(format!("Duplicate task id '{}'", task.id));
        }
    }

    for task in tasks {
        for dep in &task.dependencies {
            if !seen.contains(dep.as_str()) {
                errors.push(format!(
                    "Task '{}' depends on unknown task '{}'",
                    task.id, dep
                ));
            }
        }
        for target in &task.unblocks {
            if !seen.contains(target.as_str()) {
                errors.push(format!(
                    "Task '{}' unblocks unknown task '{}'",
                    task.id, target
                ));
            }
        }
    }

    let residual = cyclic_residual(tasks, &seen);
    if !residual.is_empty() {
        errors.push(format!(
            "Cycle detected among tasks: {}",
            residual.join(", ")
        ));
    }

    errors
}

/// Same as [`validate_tasks`], but as a `Result` for use with `?`.
pub fn ensure_valid(tasks: &[TaskNode]) -> Result<(), GraphError> {
    let errors = validate_tasks(tasks);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(GraphError::Validation(errors))
    }
}

/// Kahn's algorithm over `dependencies` edges (restricted to known ids).
///
/// Returns every task that could never be removed from the in-degree queue,
/// in task order: the members of each cycle plus anything downstream of one.
/// An empty result means the graph is acyclic.
fn cyclic_residual<'a>(tasks: &'a [TaskNode], known: &HashSet<&'a str>) -> Vec<&'a str> {
    // Edge direction: dep -> task.
    // A task with `dependencies = ["A"]` produces edge A -> task.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for task in tasks {
        graph.add_node(task.id.as_str());
    }
    for task in tasks {
        for dep in task.dependencies.iter().map(String::as_str) {
            if known.contains(dep) {
                graph.add_edge(dep, task.id.as_str(), ());
            }
        }
    }

    if toposort(&graph, None).is_ok() {
        return Vec::new();
    }

    let mut in_degree: HashMap<&str, usize> = graph
        .nodes()
        .map(|n| (n, graph.neighbors_directed(n, Direction::Incoming).count()))
        .collect();

    let mut queue: VecDeque<&str> = tasks
        .iter()
        .map(|t| t.id.as_str())
        .filter(|id| in_degree.get(id) == Some(&0))
        .collect();
    let mut sorted: HashSet<&str> = HashSet::new();

    while let Some(node) = queue.pop_front() {
        if !sorted.insert(node) {
            continue;
        }
        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            if let Some(deg) = in_degree.get_mut(next) {
                *deg = deg.saturating_sub(1);
                if *deg == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    let mut reported: HashSet<&str> = HashSet::new();
    tasks
        .iter()
        .map(|t| t.id.as_str())
        .filter(|id| !sorted.contains(id) && reported.insert(*id))
        .collect()
}
