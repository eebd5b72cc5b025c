// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_CONFIG_FILE;
use crate::types::TaskStatus;

/// Command-line arguments for `taskweave`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskweave",
    version,
    about = "Track a dependency-aware task graph for autonomous workers.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Optional for every command except `init`.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: String,

    /// Path to the graph state file (JSON). Overrides `[config].state_file`.
    #[arg(long, value_name = "PATH", global = true)]
    pub state: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKWEAVE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Replace the graph with the `[[task]]` entries from the config file.
    Init,

    /// List tasks that are ready to start.
    Ready,

    /// Change a task's status (in_progress, completed, failed).
    Update {
        task_id: String,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
        /// Result artifact to record when completing.
        #[arg(long)]
        output: Option<String>,
    },

    /// Add a task that receives context from the task that unblocks it.
    Spawn(NewTaskCli),

    /// Add a task that receives context from every completed task.
    Fork(NewTaskCli),

    /// Add a question that blocks downstream work until answered.
    Ask {
        id: String,
        #[arg(long)]
        question: String,
        /// Suggested answer (repeatable).
        #[arg(long = "option", value_name = "TEXT")]
        options: Vec<String>,
        #[arg(long = "after", value_name = "ID")]
        dependencies: Vec<String>,
        #[arg(long = "unblocks", value_name = "ID")]
        unblocks: Vec<String>,
    },

    /// Answer a pending question.
    Answer { task_id: String, answer: String },

    /// Print the dependency tree.
    Tree,

    /// Print the grouped status block.
    Status,

    /// Execute a raw JSON command, e.g. `{"command":"read_tree"}`.
    Exec { json: String },
}

/// Arguments shared by `spawn` and `fork`.
#[derive(Debug, Clone, Args)]
pub struct NewTaskCli {
    pub id: String,
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Upstream task id (repeatable).
    #[arg(long = "after", value_name = "ID")]
    pub dependencies: Vec<String>,
    /// Downstream task id (repeatable).
    #[arg(long = "unblocks", value_name = "ID")]
    pub unblocks: Vec<String>,
    #[arg(long = "capability", value_name = "NAME")]
    pub required_capabilities: Vec<String>,
    #[arg(long = "subagent", value_name = "NAME")]
    pub assigned_subagent: Option<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    s.parse()
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
