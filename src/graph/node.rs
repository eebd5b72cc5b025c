// src/graph/node.rs

//! The task node entity and the status-less spec used to create nodes.

use serde::{Deserialize, Serialize};

use crate::types::{NodeType, TaskId, TaskStatus};

/// A single task in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNode {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub node_type: NodeType,
    /// Upstream tasks that must be `completed` before this one may start.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    /// Downstream tasks whose dependencies this task helps satisfy.
    #[serde(default)]
    pub unblocks: Vec<TaskId>,
    /// Routing hint only; never enforced.
    #[serde(default)]
    pub required_capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_subagent: Option<String>,
    /// Text accumulated from upstream completions. Append-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_context: Option<String>,
    /// Result artifact, or the answer text for ask nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_options: Option<Vec<String>>,
}

impl TaskNode {
    pub fn is_ask(&self) -> bool {
        self.node_type == NodeType::Ask
    }

    /// An ask node that has not been answered yet.
    pub fn is_open_question(&self) -> bool {
        self.is_ask() && self.status != TaskStatus::Completed
    }

    /// Attribution line used when this task's output is propagated downstream.
    ///
    /// Returns `None` if the task has no output.
    pub fn attribution(&self) -> Option<String> {
        self.output_result
            .as_ref()
            .map(|out| format!("[From {}]: {}", self.title, out))
    }

    /// Append a block of propagated text to `input_context`.
    pub fn append_context(&mut self, block: &str) {
        self.input_context = Some(match self.input_context.take() {
            Some(existing) if !existing.is_empty() => format!("{existing}\n\n{block}"),
            _ => block.to_string(),
        });
    }
}

/// Node specification as supplied by callers: everything except status and
/// the engine-managed context/result fields.
///
/// Used by `generateTaskGraph` and the config file's `[[task]]` entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    #[serde(default)]
    pub unblocks: Vec<TaskId>,
    #[serde(default)]
    pub required_capabilities: Vec<String>,
    #[serde(default)]
    pub assigned_subagent: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer_options: Option<Vec<String>>,
}

impl TaskSpec {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Materialise a `pending` node from this spec.
    ///
    /// An empty title falls back to the id so every node renders with a label.
    pub fn into_node(self) -> TaskNode {
        let title = if self.title.trim().is_empty() {
            self.id.clone()
        } else {
            self.title
        };

        TaskNode {
            id: self.id,
            title,
            description: self.description,
            status: TaskStatus::Pending,
            node_type: self.node_type,
            dependencies: self.dependencies,
            unblocks: self.unblocks,
            required_capabilities: self.required_capabilities,
            assigned_subagent: self.assigned_subagent,
            input_context: None,
            output_result: None,
            question: self.question,
            answer_options: self.answer_options,
        }
    }
}

/// Truncate `text` to at most `max_chars` characters, appending `...` when
/// anything was cut. Counts `char`s, so multi-byte text is never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
