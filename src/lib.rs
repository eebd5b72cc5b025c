// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod render;
pub mod store;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, CliCommand, NewTaskCli};
use crate::config::{ConfigFile, load_and_validate, load_or_default};
use crate::engine::{Command, CommandResponse, Engine, EngineOptions, NewTaskArgs};
use crate::store::FileGraphStore;

/// High-level entry point used by `main.rs`.
///
/// Loads the config, opens the file-backed store, executes exactly one
/// command and prints its result to stdout.
///
/// Returns the command's `success` flag.
pub fn run(args: CliArgs) -> Result<bool> {
    let config_path = PathBuf::from(&args.config);

    let cfg = match args.command {
        CliCommand::Init => load_and_validate(&config_path)?,
        _ => load_or_default(&config_path)?,
    };

    let state_path = args
        .state
        .clone()
        .unwrap_or_else(|| cfg.config.state_file.clone());
    debug!(config = ?config_path, state = %state_path, "opening graph store");

    let mut engine = Engine::new(
        FileGraphStore::new(state_path),
        EngineOptions::from(&cfg.config),
    );

    let command = to_command(args.command, &cfg)?;
    let response = engine.execute(command.clone())?;

    println!("{}", format_response(&command, &response)?);
    Ok(response.success)
}

/// Translate a parsed CLI subcommand into an engine [`Command`].
pub fn to_command(cli: CliCommand, cfg: &ConfigFile) -> Result<Command> {
    let command = match cli {
        CliCommand::Init => Command::GenerateTaskGraph {
            tasks: cfg.task.clone(),
        },
        CliCommand::Ready => Command::GetUnblockedTasks,
        CliCommand::Update {
            task_id,
            status,
            output,
        } => Command::UpdateTaskStatus {
            task_id,
            status,
            output_result: output,
        },
        CliCommand::Spawn(args) => Command::SpawnTask(new_task_args(args)),
        CliCommand::Fork(args) => Command::ForkTask(new_task_args(args)),
        CliCommand::Ask {
            id,
            question,
            options,
            dependencies,
            unblocks,
        } => Command::AskHuman {
            id,
            question,
            answer_options: if options.is_empty() { None } else { Some(options) },
            dependencies,
            unblocks,
        },
        CliCommand::Answer { task_id, answer } => Command::AnswerQuestion { task_id, answer },
        CliCommand::Tree => Command::ReadTree,
        CliCommand::Status => Command::StatusReport,
        CliCommand::Exec { json } => Command::from_json(&json)?,
    };
    Ok(command)
}

/// Text printed for a response: the rendered tree / status block for the
/// read-only views, pretty JSON for everything else.
pub fn format_response(command: &Command, response: &CommandResponse) -> Result<String> {
    let text = match (command, &response.tree, &response.report) {
        (Command::ReadTree, Some(tree), _) => format!("{tree}\n\n{}", response.message),
        (Command::StatusReport, _, Some(report)) => report.clone(),
        (Command::StatusReport, _, None) => response.message.clone(),
        _ => serde_json::to_string_pretty(response)?,
    };
    Ok(text)
}

fn new_task_args(args: NewTaskCli) -> NewTaskArgs {
    NewTaskArgs {
        id: args.id,
        title: args.title,
        description: args.description,
        dependencies: args.dependencies,
        unblocks: args.unblocks,
        required_capabilities: args.required_capabilities,
        assigned_subagent: args.assigned_subagent,
    }
}
