// src/engine/command.rs

//! Serializable commands and their dispatcher.
//!
//! ```json
//! { "command": "update_task_status", "task_id": "audit", "status": "completed",
//!   "output_result": "3 services, 1 database" }
//! ```
//!
//! Command names are snake_case; the camelCase spellings (`updateTaskStatus`,
//! `taskId`, ...) are accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::engine::core::Engine;
use crate::engine::response::CommandResponse;
use crate::errors::Result;
use crate::graph::{AskSpec, TaskSpec};
use crate::store::GraphStore;
use crate::types::{NodeType, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    #[serde(alias = "generateTaskGraph")]
    GenerateTaskGraph { tasks: Vec<TaskSpec> },

    #[serde(alias = "getUnblockedTasks")]
    GetUnblockedTasks,

    #[serde(alias = "updateTaskStatus")]
    UpdateTaskStatus {
        #[serde(alias = "taskId")]
        task_id: TaskId,
        status: TaskStatus,
        #[serde(default, alias = "outputResult")]
        output_result: Option<String>,
    },

    #[serde(alias = "spawnTask")]
    SpawnTask(NewTaskArgs),

    #[serde(alias = "forkTask")]
    ForkTask(NewTaskArgs),

    #[serde(alias = "askHuman")]
    AskHuman {
        id: TaskId,
        question: String,
        #[serde(default, alias = "answerOptions")]
        answer_options: Option<Vec<String>>,
        #[serde(default)]
        dependencies: Vec<TaskId>,
        #[serde(default)]
        unblocks: Vec<TaskId>,
    },

    #[serde(alias = "answerQuestion")]
    AnswerQuestion {
        #[serde(alias = "taskId")]
        task_id: TaskId,
        answer: String,
    },

    #[serde(alias = "readTree")]
    ReadTree,

    #[serde(alias = "statusReport")]
    StatusReport,
}

/// Arguments shared by `spawn_task` and `fork_task`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewTaskArgs {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    #[serde(default)]
    pub unblocks: Vec<TaskId>,
    #[serde(default, alias = "requiredCapabilities")]
    pub required_capabilities: Vec<String>,
    #[serde(default, alias = "assignedSubagent")]
    pub assigned_subagent: Option<String>,
}

impl NewTaskArgs {
    pub fn into_spec(self, node_type: NodeType) -> TaskSpec {
        TaskSpec {
            id: self.id,
            title: self.title,
            description: self.description,
            node_type,
            dependencies: self.dependencies,
            unblocks: self.unblocks,
            required_capabilities: self.required_capabilities,
            assigned_subagent: self.assigned_subagent,
            question: None,
            answer_options: None,
        }
    }
}

impl Command {
    /// Parse a command from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Snake_case name of the command, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GenerateTaskGraph { .. } => "generate_task_graph",
            Command::GetUnblockedTasks => "get_unblocked_tasks",
            Command::UpdateTaskStatus { .. } => "update_task_status",
            Command::SpawnTask(_) => "spawn_task",
            Command::ForkTask(_) => "fork_task",
            Command::AskHuman { .. } => "ask_human",
            Command::AnswerQuestion { .. } => "answer_question",
            Command::ReadTree => "read_tree",
            Command::StatusReport => "status_report",
        }
    }
}

impl<S: GraphStore> Engine<S> {
    /// Dispatch a single command to its handler.
    pub fn execute(&mut self, command: Command) -> Result<CommandResponse> {
        tracing::debug!(command = command.name(), "executing command");

        match command {
            Command::GenerateTaskGraph { tasks } => self.generate_task_graph(tasks),
            Command::GetUnblockedTasks => self.get_unblocked_tasks(),
            Command::UpdateTaskStatus {
                task_id,
                status,
                output_result,
            } => self.update_task_status(&task_id, status, output_result),
            Command::SpawnTask(args) => self.spawn_task(args.into_spec(NodeType::Spawn)),
            Command::ForkTask(args) => self.fork_task(args.into_spec(NodeType::Fork)),
            Command::AskHuman {
                id,
                question,
                answer_options,
                dependencies,
                unblocks,
            } => self.ask_human(AskSpec {
                id,
                question,
                answer_options,
                dependencies,
                unblocks,
            }),
            Command::AnswerQuestion { task_id, answer } => {
                self.answer_question(&task_id, &answer)
            }
            Command::ReadTree => self.read_tree(),
            Command::StatusReport => Ok(match self.status_report()? {
                Some(report) => CommandResponse::ok("Task graph status").with_report(report),
                None => CommandResponse::ok("No tasks in graph"),
            }),
        }
    }
}
