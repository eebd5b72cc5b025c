// src/errors.rs

//! Crate-wide error types.
//!
//! - [`GraphError`] covers the expected, in-conversation failures of graph
//!   commands. The engine turns these into `success: false` responses.
//! - [`TaskweaveError`] covers host-level failures (store IO, decoding,
//!   configuration, stale snapshots) that propagate to the caller.

use thiserror::Error;

use crate::types::{TaskId, TaskStatus};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Task graph validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Task '{id}' not found. Known task ids: {}", format_ids(.known))]
    TaskNotFound { id: TaskId, known: Vec<TaskId> },

    #[error("Task '{0}' is already completed; its status cannot be changed")]
    AlreadyCompleted(TaskId),

    #[error("Task '{id}' has unmet dependencies: {}", .unmet.join(", "))]
    UnmetDependencies { id: TaskId, unmet: Vec<TaskId> },

    #[error("Task '{id}' cannot move from {from} to {to}")]
    InvalidTransition {
        id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("Task '{0}' is not an ask node; only ask nodes can be answered")]
    NotAskNode(TaskId),

    #[error("Question '{0}' has already been answered")]
    AlreadyAnswered(TaskId),

    #[error("Task '{0}' already exists")]
    DuplicateId(TaskId),

    #[error("Ask node '{0}' requires a non-empty question")]
    EmptyQuestion(TaskId),
}

fn format_ids(ids: &[TaskId]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.join(", ")
    }
}

#[derive(Error, Debug)]
pub enum TaskweaveError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Stale snapshot: expected revision {expected}, store is at revision {actual}")]
    StaleSnapshot { expected: u64, actual: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TaskweaveError>;
