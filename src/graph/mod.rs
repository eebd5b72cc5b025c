// src/graph/mod.rs

//! Task graph model and the pure transformations over it.
//!
//! - [`node`] defines [`TaskNode`] and the status-less [`TaskSpec`].
//! - [`snapshot`] holds the ordered, indexed [`TaskGraph`] snapshot.
//! - [`validate`] checks duplicate ids, dangling references and cycles.
//! - [`normalize`] computes the symmetric closure of edges.
//! - [`resolver`] answers "which tasks are ready?".
//! - [`transition`] applies status changes and propagates context.
//! - [`mutate`] adds nodes to a live graph and answers questions.
//!
//! Nothing in here performs IO or holds state between calls.

pub mod mutate;
pub mod node;
pub mod normalize;
pub mod resolver;
pub mod snapshot;
pub mod transition;
pub mod validate;

pub use mutate::{AskSpec, DEFAULT_TITLE_LENGTH, Mutation, answer_question, ask_human, fork_task, spawn_task};
pub use node::{TaskNode, TaskSpec, truncate_chars};
pub use normalize::normalize;
pub use resolver::{unblocked, unmet_dependencies};
pub use snapshot::{StatusCounts, TaskGraph};
pub use transition::{Transition, TransitionKind, apply_status};
pub use validate::{ensure_valid, validate_tasks};
