// src/graph/snapshot.rs

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::graph::node::TaskNode;
use crate::types::{TaskId, TaskStatus};

/// Immutable-by-convention snapshot of the whole task collection.
///
/// Tasks are kept in insertion order (which drives every "stable" output:
/// ready lists, tree roots, status sections) plus an id -> position index for
/// O(1) lookups. If a candidate list contains duplicate ids, the index points
/// at the first occurrence; the validator reports the repeats.
///
/// Mutating operations never touch a snapshot in place. They clone the task
/// list, edit the clone and build a new `TaskGraph` from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TaskNode>", into = "Vec<TaskNode>")]
pub struct TaskGraph {
    tasks: Vec<TaskNode>,
    index: HashMap<TaskId, usize>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<TaskNode>) -> Self {
        let mut index = HashMap::with_capacity(tasks.len());
        for (pos, task) in tasks.iter().enumerate() {
            index.entry(task.id.clone()).or_insert(pos);
        }
        Self { tasks, index }
    }

    pub fn tasks(&self) -> &[TaskNode] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<TaskNode> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TaskNode> {
        self.index.get(id).map(|&pos| &self.tasks[pos])
    }

    /// Position of `id` in graph order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All ids in graph order.
    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id.clone()).collect()
    }

    /// Ids of every task currently `completed`.
    pub fn completed_ids(&self) -> HashSet<&str> {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .map(|t| t.id.as_str())
            .collect()
    }

    /// Number of tasks per status, plus unanswered ask nodes.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for task in &self.tasks {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::Failed => counts.failed += 1,
            }
            if task.is_open_question() {
                counts.open_questions += 1;
            }
        }
        counts
    }
}

impl From<Vec<TaskNode>> for TaskGraph {
    fn from(tasks: Vec<TaskNode>) -> Self {
        Self::from_tasks(tasks)
    }
}

impl From<TaskGraph> for Vec<TaskNode> {
    fn from(graph: TaskGraph) -> Self {
        graph.tasks
    }
}

/// Per-status totals for summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
    /// Ask nodes that have not been answered yet.
    pub open_questions: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed + self.failed
    }
}
