// src/engine/core.rs

//! The command handlers.
//!
//! Each handler reads one snapshot from the store, computes a new graph with
//! the pure functions in [`crate::graph`], and commits it back with the
//! revision it started from. Read-only commands never commit.

use tracing::{debug, info, warn};

use crate::engine::EngineOptions;
use crate::engine::response::CommandResponse;
use crate::errors::{GraphError, Result};
use crate::graph::{
    self, AskSpec, Mutation, TaskGraph, TaskNode, TaskSpec, Transition, TransitionKind,
    truncate_chars,
};
use crate::render::{render_tree, status_report};
use crate::store::GraphStore;
use crate::types::{NodeType, TaskStatus};

/// Task graph engine bound to a caller-supplied [`GraphStore`].
///
/// Pass `&mut store` to keep ownership of the store on the caller's side.
#[derive(Debug)]
pub struct Engine<S: GraphStore> {
    store: S,
    options: EngineOptions,
}

impl<S: GraphStore> Engine<S> {
    pub fn new(store: S, options: EngineOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current graph as held by the store.
    pub fn graph(&self) -> Result<TaskGraph> {
        Ok(self.store.load()?.graph)
    }

    /// `generateTaskGraph`: replace the whole graph with `specs`.
    pub fn generate_task_graph(&mut self, specs: Vec<TaskSpec>) -> Result<CommandResponse> {
        let snapshot = self.store.load()?;

        let title_length = self.options.title_length;
        let nodes: Vec<TaskNode> = specs
            .into_iter()
            .map(|spec| node_from_spec(spec, title_length))
            .collect();
        let nodes = graph::normalize(&nodes);

        if let Err(err) = graph::ensure_valid(&nodes) {
            return Ok(rejected("generate_task_graph", err));
        }

        let graph = TaskGraph::from_tasks(nodes);
        let count = graph.len();
        let tasks = graph.tasks().to_vec();
        self.commit(snapshot.revision, graph)?;

        Ok(CommandResponse::ok(format!("Task graph created with {count} tasks"))
            .with_task_count(count)
            .with_tasks(tasks))
    }

    /// `getUnblockedTasks`: pending tasks whose dependencies are all completed.
    pub fn get_unblocked_tasks(&self) -> Result<CommandResponse> {
        let graph = self.graph()?;
        let ready: Vec<TaskNode> = graph::unblocked(&graph).into_iter().cloned().collect();

        let message = if ready.is_empty() {
            "No tasks are ready to start".to_string()
        } else {
            format!(
                "{} task(s) ready to start: {}",
                ready.len(),
                ready.iter().map(|t| t.id.as_str()).collect::<Vec<_>>().join(", ")
            )
        };

        Ok(CommandResponse::ok(message).with_tasks(ready))
    }

    /// `updateTaskStatus`.
    pub fn update_task_status(
        &mut self,
        task_id: &str,
        status: TaskStatus,
        output_result: Option<String>,
    ) -> Result<CommandResponse> {
        let snapshot = self.store.load()?;

        match graph::apply_status(&snapshot.graph, task_id, status, output_result) {
            Ok(transition) => self.finish_transition(snapshot.revision, transition),
            Err(err) => Ok(rejected("update_task_status", err)),
        }
    }

    /// `spawnTask`: append a `spawn` node.
    pub fn spawn_task(&mut self, spec: TaskSpec) -> Result<CommandResponse> {
        let snapshot = self.store.load()?;
        let result = graph::spawn_task(&snapshot.graph, spec);
        self.finish_mutation(snapshot.revision, "spawn_task", result, |task| {
            format!("Spawned task '{}'", task.id)
        })
    }

    /// `forkTask`: append a `fork` node.
    pub fn fork_task(&mut self, spec: TaskSpec) -> Result<CommandResponse> {
        let snapshot = self.store.load()?;
        let result = graph::fork_task(&snapshot.graph, spec);
        self.finish_mutation(snapshot.revision, "fork_task", result, |task| {
            format!("Forked task '{}' (receives all completed context)", task.id)
        })
    }

    /// `askHuman`: append an `ask` node.
    pub fn ask_human(&mut self, ask: AskSpec) -> Result<CommandResponse> {
        let snapshot = self.store.load()?;
        let result = graph::ask_human(&snapshot.graph, ask, self.options.title_length);
        self.finish_mutation(snapshot.revision, "ask_human", result, |task| {
            format!("Question '{}' added: {}", task.id, task.title)
        })
    }

    /// `answerQuestion`: complete an `ask` node with `answer`.
    pub fn answer_question(&mut self, task_id: &str, answer: &str) -> Result<CommandResponse> {
        let snapshot = self.store.load()?;

        match graph::answer_question(&snapshot.graph, task_id, answer) {
            Ok(transition) => self.finish_transition(snapshot.revision, transition),
            Err(err) => Ok(rejected("answer_question", err)),
        }
    }

    /// `readTree`: the rendered forest plus every task.
    pub fn read_tree(&self) -> Result<CommandResponse> {
        let graph = self.graph()?;
        let rendered = render_tree(&graph, self.options.render);

        Ok(CommandResponse::ok(rendered.summary)
            .with_tree(rendered.tree)
            .with_tasks(graph.into_tasks()))
    }

    /// Status block for the driving agent's context; `None` for an empty graph.
    pub fn status_report(&self) -> Result<Option<String>> {
        let graph = self.graph()?;
        Ok(status_report(&graph, self.options.render))
    }

    fn commit(&mut self, revision: u64, graph: TaskGraph) -> Result<u64> {
        let tasks = graph.len();
        let new_revision = self.store.replace(revision, graph)?;
        info!(revision = new_revision, tasks, "committed task graph");
        Ok(new_revision)
    }

    fn finish_transition(&mut self, revision: u64, transition: Transition) -> Result<CommandResponse> {
        let Transition {
            kind,
            graph,
            task,
            newly_unblocked,
        } = transition;

        if kind.changes_graph() {
            self.commit(revision, graph)?;
        } else {
            debug!(task = %task.id, ?kind, "status unchanged; nothing to commit");
        }

        let mut message = transition_message(kind, &task);
        if !newly_unblocked.is_empty() {
            let ids: Vec<&str> = newly_unblocked.iter().map(|t| t.id.as_str()).collect();
            message.push_str(&format!(". Unblocked: {}", ids.join(", ")));
        }

        Ok(CommandResponse::ok(message)
            .with_task(task)
            .with_newly_unblocked(newly_unblocked))
    }

    fn finish_mutation(
        &mut self,
        revision: u64,
        command: &str,
        result: std::result::Result<Mutation, GraphError>,
        message: impl FnOnce(&TaskNode) -> String,
    ) -> Result<CommandResponse> {
        match result {
            Ok(Mutation { graph, task }) => {
                self.commit(revision, graph)?;
                Ok(CommandResponse::ok(message(&task)).with_task(task))
            }
            Err(err) => Ok(rejected(command, err)),
        }
    }
}

fn rejected(command: &str, err: GraphError) -> CommandResponse {
    warn!(command, error = %err, "command rejected");
    CommandResponse::failure(err.to_string())
}

fn transition_message(kind: TransitionKind, task: &TaskNode) -> String {
    match kind {
        TransitionKind::Started => format!("Task '{}' is now in progress", task.id),
        TransitionKind::Restarted => format!("Task '{}' restarted after failure", task.id),
        TransitionKind::AlreadyInProgress => format!("Task '{}' is already in progress", task.id),
        TransitionKind::Completed if task.is_ask() => {
            format!("Question '{}' answered", task.id)
        }
        TransitionKind::Completed => format!("Task '{}' completed", task.id),
        TransitionKind::Failed => format!("Task '{}' marked as failed", task.id),
        TransitionKind::AlreadyFailed => format!("Task '{}' is already marked as failed", task.id),
    }
}

/// Ask nodes declared in bulk get the same derived title as `askHuman`
/// when they do not carry one of their own.
fn node_from_spec(spec: TaskSpec, title_length: usize) -> TaskNode {
    let derived_title = match (&spec.node_type, spec.title.trim().is_empty(), &spec.question) {
        (NodeType::Ask, true, Some(question)) => Some(truncate_chars(question.trim(), title_length)),
        _ => None,
    };

    let mut node = spec.into_node();
    if let Some(title) = derived_title {
        node.title = title;
    }
    node
}
