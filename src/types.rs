// src/types.rs

//! Small shared enums used across the graph, engine and CLI layers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical task identifier type used throughout the engine.
pub type TaskId = String;

/// Lifecycle status of a task node.
///
/// `Completed` is terminal. `Failed` may be restarted to `InProgress` when the
/// task's dependencies are still satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            other => Err(format!(
                "invalid task status: {other} (expected \"pending\", \"in_progress\", \"completed\" or \"failed\")"
            )),
        }
    }
}

/// Context-propagation policy of a node.
///
/// - `Spawn` (default): receives only the output of the task whose completion
///   unblocked it.
/// - `Fork`: receives the outputs of every completed task in the graph at the
///   moment it unblocks.
/// - `Ask`: a human question; completed by supplying an answer. Propagates
///   like `Spawn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Spawn,
    Fork,
    Ask,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Spawn => "spawn",
            NodeType::Fork => "fork",
            NodeType::Ask => "ask",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spawn" => Ok(NodeType::Spawn),
            "fork" => Ok(NodeType::Fork),
            "ask" => Ok(NodeType::Ask),
            other => Err(format!(
                "invalid node_type: {other} (expected \"spawn\", \"fork\" or \"ask\")"
            )),
        }
    }
}
