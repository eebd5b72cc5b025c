// src/graph/mutate.rs

//! Growing a live graph: spawn / fork / ask nodes, and answering questions.

use tracing::debug;

use crate::errors::GraphError;
use crate::graph::node::{TaskNode, TaskSpec, truncate_chars};
use crate::graph::normalize::normalize;
use crate::graph::resolver::unmet_dependencies;
use crate::graph::snapshot::TaskGraph;
use crate::graph::transition::{Transition, complete_at, locate};
use crate::graph::validate::ensure_valid;
use crate::types::{NodeType, TaskId};

/// Default character budget for titles derived from a question.
pub const DEFAULT_TITLE_LENGTH: usize = 60;

/// Result of adding a node to the graph.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub graph: TaskGraph,
    /// The created node, as it looks after normalization.
    pub task: TaskNode,
}

/// Input for `askHuman`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskSpec {
    pub id: TaskId,
    pub question: String,
    pub answer_options: Option<Vec<String>>,
    pub dependencies: Vec<TaskId>,
    pub unblocks: Vec<TaskId>,
}

/// Append a `spawn` node.
pub fn spawn_task(graph: &TaskGraph, spec: TaskSpec) -> Result<Mutation, GraphError> {
    add_node(graph, spec, NodeType::Spawn)
}

/// Append a `fork` node.
pub fn fork_task(graph: &TaskGraph, spec: TaskSpec) -> Result<Mutation, GraphError> {
    add_node(graph, spec, NodeType::Fork)
}

/// Append an `ask` node whose title is derived from the question.
pub fn ask_human(
    graph: &TaskGraph,
    ask: AskSpec,
    title_length: usize,
) -> Result<Mutation, GraphError> {
    let question = ask.question.trim();
    if question.is_empty() {
        return Err(GraphError::EmptyQuestion(ask.id));
    }

    let spec = TaskSpec {
        title: truncate_chars(question, title_length),
        description: question.to_string(),
        question: Some(question.to_string()),
        answer_options: ask.answer_options,
        dependencies: ask.dependencies,
        unblocks: ask.unblocks,
        ..TaskSpec::new(ask.id, String::new())
    };

    add_node(graph, spec, NodeType::Ask)
}

/// Complete an `ask` node with the supplied answer.
///
/// The answer becomes the node's `output_result` and is propagated exactly
/// like a completed `spawn` task.
pub fn answer_question(
    graph: &TaskGraph,
    id: &str,
    answer: impl Into<String>,
) -> Result<Transition, GraphError> {
    let pos = locate(graph, id)?;
    let node = &graph.tasks()[pos];

    if !node.is_ask() {
        return Err(GraphError::NotAskNode(id.to_string()));
    }
    if !node.is_open_question() {
        return Err(GraphError::AlreadyAnswered(id.to_string()));
    }

    let unmet = unmet_dependencies(graph, node);
    if !unmet.is_empty() {
        return Err(GraphError::UnmetDependencies {
            id: id.to_string(),
            unmet,
        });
    }

    Ok(complete_at(graph, pos, Some(answer.into())))
}

/// Shared path for every mutator: reject duplicates, append a pending node,
/// re-normalize and re-validate. The input graph is never touched.
fn add_node(graph: &TaskGraph, spec: TaskSpec, node_type: NodeType) -> Result<Mutation, GraphError> {
    if graph.contains(&spec.id) {
        return Err(GraphError::DuplicateId(spec.id));
    }

    let mut node = spec.into_node();
    node.node_type = node_type;
    let id = node.id.clone();

    let mut tasks = graph.tasks().to_vec();
    tasks.push(node);

    let tasks = normalize(&tasks);
    ensure_valid(&tasks)?;

    let graph = TaskGraph::from_tasks(tasks);
    let task = locate(&graph, &id).map(|pos| graph.tasks()[pos].clone())?;

    debug!(task = %id, node_type = %node_type, total = graph.len(), "node added");

    Ok(Mutation { graph, task })
}
