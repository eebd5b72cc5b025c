mod common;
use crate::common::builders::GraphBuilder;
use crate::common::task_of;

use std::error::Error;

use taskweave::cli::CliCommand;
use taskweave::config::ConfigFile;
use taskweave::engine::Command;
use taskweave::types::{NodeType, TaskStatus};
use taskweave::{format_response, to_command};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn json_commands_drive_the_engine() -> TestResult {
    let mut engine = GraphBuilder::new().engine();

    let script = [
        r#"{"command":"generate_task_graph","tasks":[
            {"id":"a","title":"Alpha"},
            {"id":"b","title":"Beta","dependencies":["a"],"node_type":"fork"}
        ]}"#,
        r#"{"command":"updateTaskStatus","taskId":"a","status":"completed","outputResult":"hello"}"#,
        r#"{"command":"askHuman","id":"q","question":"Continue?","dependencies":["b"]}"#,
        r#"{"command":"spawn_task","id":"c","title":"Gamma","unblocks":["q"]}"#,
    ];

    for json in script {
        let response = engine.execute(Command::from_json(json)?)?;
        assert!(response.success, "{json}: {}", response.message);
    }

    assert_eq!(task_of(&engine, "b").node_type, NodeType::Fork);
    assert_eq!(task_of(&engine, "b").input_context.as_deref(), Some("[From Alpha]: hello"));
    assert_eq!(task_of(&engine, "q").node_type, NodeType::Ask);
    assert_eq!(
        task_of(&engine, "q").dependencies,
        vec!["b".to_string(), "c".to_string()]
    );

    Ok(())
}

#[test]
fn generate_reports_count_and_normalized_tasks() -> TestResult {
    let mut engine = GraphBuilder::new().engine();
    let response = engine.execute(Command::from_json(
        r#"{"command":"generate_task_graph","tasks":[{"id":"a","unblocks":["b"]},{"id":"b"}]}"#,
    )?)?;

    assert!(response.success);
    assert_eq!(response.task_count, Some(2));
    let tasks = response.tasks.expect("tasks");
    assert_eq!(tasks[1].dependencies, vec!["a".to_string()]);
    assert_eq!(tasks[0].title, "a", "empty title falls back to the id");
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));

    Ok(())
}

#[test]
fn invalid_generate_keeps_the_previous_graph() -> TestResult {
    let mut engine = GraphBuilder::new()
        .with_task(taskweave::graph::TaskSpec::new("keep", "Keep me"))
        .engine();

    let response = engine.execute(Command::from_json(
        r#"{"command":"generate_task_graph","tasks":[{"id":"x"},{"id":"x"}]}"#,
    )?)?;
    assert!(!response.success);
    assert!(response.message.contains("Duplicate task id 'x'"));
    assert_eq!(engine.store().graph().ids(), vec!["keep"]);

    Ok(())
}

#[test]
fn unknown_command_names_fail_to_parse() {
    assert!(Command::from_json(r#"{"command":"delete_everything"}"#).is_err());
}

#[test]
fn responses_serialize_without_empty_fields() -> TestResult {
    let engine = GraphBuilder::new().engine();
    let response = engine.get_unblocked_tasks()?;
    let json = serde_json::to_value(&response)?;

    assert_eq!(json["success"], true);
    assert!(json.get("task").is_none());
    assert!(json.get("newly_unblocked").is_none());
    assert_eq!(json["tasks"], serde_json::json!([]));

    Ok(())
}

#[test]
fn cli_init_uses_the_config_task_list() -> TestResult {
    let cfg = ConfigFile {
        task: vec![taskweave::graph::TaskSpec::new("a", "Alpha")],
        ..ConfigFile::default()
    };

    match to_command(CliCommand::Init, &cfg)? {
        Command::GenerateTaskGraph { tasks } => assert_eq!(tasks[0].id, "a"),
        other => panic!("unexpected command {other:?}"),
    }

    let exec = to_command(
        CliCommand::Exec {
            json: r#"{"command":"read_tree"}"#.to_string(),
        },
        &cfg,
    )?;
    assert_eq!(exec, Command::ReadTree);

    Ok(())
}

#[test]
fn tree_and_status_print_as_text() -> TestResult {
    let mut engine = GraphBuilder::new().engine();
    engine.execute(Command::from_json(
        r#"{"command":"generate_task_graph","tasks":[{"id":"a","title":"Alpha"}]}"#,
    )?)?;

    let tree = engine.execute(Command::ReadTree)?;
    let text = format_response(&Command::ReadTree, &tree)?;
    assert_eq!(text, format!("○ Alpha (a)\n\n{}", tree.message));

    let status = engine.execute(Command::StatusReport)?;
    let text = format_response(&Command::StatusReport, &status)?;
    assert!(text.starts_with("## Task Graph Status"));

    let ready = engine.execute(Command::GetUnblockedTasks)?;
    let text = format_response(&Command::GetUnblockedTasks, &ready)?;
    assert!(text.contains("\"success\": true"));

    Ok(())
}

#[test]
fn cli_defaults_to_the_config_file_in_the_working_directory() -> TestResult {
    use clap::Parser;
    use taskweave::cli::CliArgs;
    use taskweave::config::DEFAULT_CONFIG_FILE;

    let args = CliArgs::try_parse_from(["taskweave", "tree"])?;
    assert_eq!(args.config, DEFAULT_CONFIG_FILE);
    assert!(args.state.is_none());
    assert!(matches!(args.command, CliCommand::Tree));

    Ok(())
}
