// src/engine/response.rs

use serde::Serialize;

use crate::graph::TaskNode;

/// Structured `{ success, message, ... }` result returned by every command.
///
/// Expected failures (unknown ids, invalid transitions, validation errors)
/// are reported here with `success: false` instead of as `Err`, so the
/// driving agent can react to them in-conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newly_unblocked: Option<Vec<TaskNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

impl CommandResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(true, message.into())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message.into())
    }

    fn new(success: bool, message: String) -> Self {
        Self {
            success,
            message,
            task_count: None,
            tasks: None,
            task: None,
            newly_unblocked: None,
            tree: None,
            report: None,
        }
    }

    pub fn with_task_count(mut self, count: usize) -> Self {
        self.task_count = Some(count);
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<TaskNode>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    pub fn with_task(mut self, task: TaskNode) -> Self {
        self.task = Some(task);
        self
    }

    /// Attach the newly unblocked list; an empty list is left out.
    pub fn with_newly_unblocked(mut self, tasks: Vec<TaskNode>) -> Self {
        if !tasks.is_empty() {
            self.newly_unblocked = Some(tasks);
        }
        self
    }

    pub fn with_tree(mut self, tree: String) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn with_report(mut self, report: String) -> Self {
        self.report = Some(report);
        self
    }

    /// Ids of the newly unblocked tasks (empty if none).
    pub fn unblocked_ids(&self) -> Vec<&str> {
        self.newly_unblocked
            .iter()
            .flatten()
            .map(|t| t.id.as_str())
            .collect()
    }
}
