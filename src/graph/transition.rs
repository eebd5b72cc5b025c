// src/graph/transition.rs

//! Status transitions, unblock detection and context propagation.
//!
//! Every function here is pure: it reads a [`TaskGraph`] and returns a new
//! one inside a [`Transition`]. The caller commits the new snapshot in one
//! step, so intermediate states (task completed but downstream context not yet
//! propagated) are never observable.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::errors::GraphError;
use crate::graph::node::TaskNode;
use crate::graph::resolver::{deps_within, unmet_dependencies};
use crate::graph::snapshot::TaskGraph;
use crate::types::{NodeType, TaskId, TaskStatus};

/// What a status change actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// `pending -> in_progress`.
    Started,
    /// `failed -> in_progress`.
    Restarted,
    /// `in_progress -> in_progress`; nothing changed.
    AlreadyInProgress,
    /// `* -> completed` (including answering an ask node).
    Completed,
    /// `pending | in_progress -> failed`.
    Failed,
    /// `failed -> failed`; nothing changed.
    AlreadyFailed,
}

impl TransitionKind {
    /// Whether the snapshot differs from the one the transition started from.
    pub fn changes_graph(self) -> bool {
        !matches!(
            self,
            TransitionKind::AlreadyInProgress | TransitionKind::AlreadyFailed
        )
    }
}

/// Structured result of a single status change.
#[derive(Debug, Clone)]
pub struct Transition {
    pub kind: TransitionKind,
    /// The full snapshot after the change.
    pub graph: TaskGraph,
    /// The task as it looks after the change.
    pub task: TaskNode,
    /// Downstream tasks that became ready because of this change, with their
    /// propagated `input_context` already applied. Empty unless `Completed`.
    pub newly_unblocked: Vec<TaskNode>,
}

/// Apply a status change requested through `updateTaskStatus`.
///
/// | from                         | to            | outcome                      |
/// |------------------------------|---------------|------------------------------|
/// | pending / failed             | in_progress   | requires completed deps      |
/// | in_progress                  | in_progress   | no-op                        |
/// | completed                    | anything      | rejected                     |
/// | pending / in_progress / failed | completed   | unblock scan + propagation   |
/// | pending / in_progress        | failed        | status set                   |
/// | failed                       | failed        | no-op                        |
pub fn apply_status(
    graph: &TaskGraph,
    id: &str,
    status: TaskStatus,
    output: Option<String>,
) -> Result<Transition, GraphError> {
    let pos = locate(graph, id)?;
    let current = &graph.tasks()[pos];

    if current.status == TaskStatus::Completed {
        return Err(GraphError::AlreadyCompleted(id.to_string()));
    }

    match (current.status, status) {
        (TaskStatus::InProgress, TaskStatus::InProgress) => Ok(unchanged(
            graph,
            pos,
            TransitionKind::AlreadyInProgress,
        )),
        (TaskStatus::Failed, TaskStatus::Failed) => {
            Ok(unchanged(graph, pos, TransitionKind::AlreadyFailed))
        }
        (from @ (TaskStatus::Pending | TaskStatus::Failed), TaskStatus::InProgress) => {
            let unmet = unmet_dependencies(graph, current);
            if !unmet.is_empty() {
                return Err(GraphError::UnmetDependencies {
                    id: id.to_string(),
                    unmet,
                });
            }
            let kind = if from == TaskStatus::Failed {
                TransitionKind::Restarted
            } else {
                TransitionKind::Started
            };
            Ok(set_status(graph, pos, TaskStatus::InProgress, kind))
        }
        (_, TaskStatus::Completed) => Ok(complete_at(graph, pos, output)),
        (TaskStatus::Pending | TaskStatus::InProgress, TaskStatus::Failed) => Ok(set_status(
            graph,
            pos,
            TaskStatus::Failed,
            TransitionKind::Failed,
        )),
        (from, to) => Err(GraphError::InvalidTransition {
            id: id.to_string(),
            from,
            to,
        }),
    }
}

/// Mark the task at `pos` completed, detect newly unblocked downstream tasks
/// and propagate context into them according to their node type.
pub(crate) fn complete_at(graph: &TaskGraph, pos: usize, output: Option<String>) -> Transition {
    let mut tasks: Vec<TaskNode> = graph.tasks().to_vec();

    let done = &mut tasks[pos];
    done.status = TaskStatus::Completed;
    if output.is_some() {
        done.output_result = output;
    }
    let done = done.clone();
    debug!(task = %done.id, "task completed");

    let unblocked_positions = newly_unblocked_positions(graph, &tasks, &done);

    if !unblocked_positions.is_empty() {
        let direct = done.attribution();
        let everything = all_attributions(&tasks);

        for &child_pos in &unblocked_positions {
            let child = &mut tasks[child_pos];
            let block = match child.node_type {
                NodeType::Fork => everything.clone(),
                NodeType::Spawn | NodeType::Ask => direct.clone(),
            };
            if let Some(block) = block {
                child.append_context(&block);
            }
            info!(
                task = %child.id,
                node_type = %child.node_type,
                unblocked_by = %done.id,
                "task unblocked"
            );
        }
    }

    let newly_unblocked = unblocked_positions
        .iter()
        .map(|&p| tasks[p].clone())
        .collect();

    Transition {
        kind: TransitionKind::Completed,
        task: tasks[pos].clone(),
        graph: TaskGraph::from_tasks(tasks),
        newly_unblocked,
    }
}

/// Positions of tasks listed in `done.unblocks` that are pending and whose
/// dependencies are now all completed. Keeps `unblocks` order.
fn newly_unblocked_positions(graph: &TaskGraph, tasks: &[TaskNode], done: &TaskNode) -> Vec<usize> {
    let completed: HashSet<&str> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .map(|t| t.id.as_str())
        .collect();

    let mut seen: HashSet<&TaskId> = HashSet::new();
    done.unblocks
        .iter()
        .filter(|target| seen.insert(*target))
        .filter_map(|target| graph.position(target))
        .filter(|&p| {
            let candidate = &tasks[p];
            candidate.status == TaskStatus::Pending && deps_within(candidate, &completed)
        })
        .collect()
}

/// Attribution lines for every completed task with an output, in graph order,
/// joined into one block. `None` if there are none.
fn all_attributions(tasks: &[TaskNode]) -> Option<String> {
    let lines: Vec<String> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .filter_map(TaskNode::attribution)
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n\n"))
    }
}

pub(crate) fn locate(graph: &TaskGraph, id: &str) -> Result<usize, GraphError> {
    graph.position(id).ok_or_else(|| GraphError::TaskNotFound {
        id: id.to_string(),
        known: graph.ids(),
    })
}

fn set_status(graph: &TaskGraph, pos: usize, status: TaskStatus, kind: TransitionKind) -> Transition {
    let mut tasks = graph.tasks().to_vec();
    tasks[pos].status = status;
    debug!(task = %tasks[pos].id, status = %status, "task status set");

    Transition {
        kind,
        task: tasks[pos].clone(),
        graph: TaskGraph::from_tasks(tasks),
        newly_unblocked: Vec::new(),
    }
}

fn unchanged(graph: &TaskGraph, pos: usize, kind: TransitionKind) -> Transition {
    Transition {
        kind,
        task: graph.tasks()[pos].clone(),
        graph: graph.clone(),
        newly_unblocked: Vec::new(),
    }
}
