mod common;
use crate::common::builders::{GraphBuilder, task};
use crate::common::{init_tracing, ready_ids, task_of};

use std::error::Error;

use taskweave::graph::{AskSpec, TaskSpec};
use taskweave::types::{NodeType, TaskStatus};

type TestResult = Result<(), Box<dyn Error>>;

fn spec(id: &str) -> TaskSpec {
    TaskSpec::new(id, format!("Task {id}"))
}

#[test]
fn spawn_appends_a_pending_spawn_node_and_links_edges() -> TestResult {
    init_tracing();
    let mut engine = GraphBuilder::new()
        .with_task(task("A").build())
        .with_task(task("B").after("A").build())
        .engine();

    let r = engine.spawn_task(TaskSpec {
        dependencies: vec!["A".into()],
        unblocks: vec!["B".into()],
        required_capabilities: vec!["search".into()],
        assigned_subagent: Some("researcher".into()),
        ..spec("S")
    })?;
    assert!(r.success, "{}", r.message);

    let created = r.task.expect("created task");
    assert_eq!(created.node_type, NodeType::Spawn);
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.assigned_subagent.as_deref(), Some("researcher"));

    assert!(task_of(&engine, "A").unblocks.contains(&"S".to_string()));
    assert!(task_of(&engine, "B").dependencies.contains(&"S".to_string()));

    Ok(())
}

#[test]
fn fork_appends_a_fork_node() -> TestResult {
    let mut engine = GraphBuilder::new().with_task(task("A").build()).engine();

    let r = engine.fork_task(TaskSpec {
        dependencies: vec!["A".into()],
        ..spec("F")
    })?;
    assert!(r.success);
    assert_eq!(task_of(&engine, "F").node_type, NodeType::Fork);

    Ok(())
}

#[test]
fn duplicate_ids_are_rejected_by_every_mutator() -> TestResult {
    let mut engine = GraphBuilder::new().with_task(task("A").build()).engine();
    let revision = engine.store().revision();

    let r = engine.spawn_task(spec("A"))?;
    assert!(!r.success);
    assert!(r.message.contains("already exists"));

    let r = engine.fork_task(spec("A"))?;
    assert!(!r.success);

    let r = engine.ask_human(AskSpec {
        id: "A".into(),
        question: "Really?".into(),
        ..AskSpec::default()
    })?;
    assert!(!r.success);

    assert_eq!(engine.store().revision(), revision);
    assert_eq!(engine.store().graph().len(), 1);

    Ok(())
}

#[test]
fn invalid_additions_leave_the_store_untouched() -> TestResult {
    let mut engine = GraphBuilder::new()
        .with_task(task("A").build())
        .with_task(task("B").after("A").build())
        .engine();
    let before = engine.store().graph().clone();

    let r = engine.spawn_task(TaskSpec {
        dependencies: vec!["ghost".into()],
        ..spec("S")
    })?;
    assert!(!r.success);
    assert!(r.message.contains("unknown task 'ghost'"));

    // B -> C -> A would close a cycle through A -> B.
    let r = engine.spawn_task(TaskSpec {
        dependencies: vec!["B".into()],
        unblocks: vec!["A".into()],
        ..spec("C")
    })?;
    assert!(!r.success);
    assert!(r.message.contains("Cycle detected"));

    assert_eq!(engine.store().graph(), &before);

    Ok(())
}

#[test]
fn ask_derives_title_and_description_from_question() -> TestResult {
    let mut engine = GraphBuilder::new().engine();
    let question = "What is the expected peak load for the new ingestion service in requests per second?";

    let r = engine.ask_human(AskSpec {
        id: "ask_load".into(),
        question: question.into(),
        answer_options: Some(vec!["1k".into(), "10k".into()]),
        ..AskSpec::default()
    })?;
    assert!(r.success);

    let node = task_of(&engine, "ask_load");
    assert_eq!(node.node_type, NodeType::Ask);
    assert_eq!(node.description, question);
    assert_eq!(node.question.as_deref(), Some(question));
    assert_eq!(node.title.chars().count(), 63);
    assert!(node.title.ends_with("..."));
    assert!(question.starts_with(node.title.trim_end_matches("...")));

    Ok(())
}

#[test]
fn short_questions_keep_their_full_title() -> TestResult {
    let mut engine = GraphBuilder::new().engine();

    engine.ask_human(AskSpec {
        id: "q".into(),
        question: "Ship it?".into(),
        ..AskSpec::default()
    })?;

    assert_eq!(task_of(&engine, "q").title, "Ship it?");
    Ok(())
}

#[test]
fn empty_question_is_rejected() -> TestResult {
    let mut engine = GraphBuilder::new().engine();

    let r = engine.ask_human(AskSpec {
        id: "q".into(),
        question: "   ".into(),
        ..AskSpec::default()
    })?;
    assert!(!r.success);
    assert!(r.message.contains("non-empty question"));

    Ok(())
}

#[test]
fn answering_is_gated_on_dependencies() -> TestResult {
    let mut engine = GraphBuilder::new()
        .with_task(task("prep").title("Prep").build())
        .with_task(task("q").after("prep").ask("Proceed?").unblocks("go").build())
        .with_task(task("go").build())
        .engine();

    let r = engine.answer_question("q", "yes")?;
    assert!(!r.success);
    assert!(r.message.contains("unmet dependencies: prep"));

    engine.update_task_status("prep", TaskStatus::Completed, Some("ready".into()))?;
    let q = task_of(&engine, "q");
    assert_eq!(q.input_context.as_deref(), Some("[From Prep]: ready"));

    let r = engine.answer_question("q", "yes")?;
    assert!(r.success);
    assert_eq!(r.unblocked_ids(), vec!["go"]);

    let answered = task_of(&engine, "q");
    assert_eq!(answered.status, TaskStatus::Completed);
    assert_eq!(answered.output_result.as_deref(), Some("yes"));
    assert_eq!(ready_ids(&engine), vec!["go"]);

    // Ask nodes propagate like spawn nodes: only their own answer.
    assert_eq!(
        task_of(&engine, "go").input_context.as_deref(),
        Some("[From Task q]: yes")
    );

    Ok(())
}

#[test]
fn answering_rejects_non_ask_and_answered_nodes() -> TestResult {
    let mut engine = GraphBuilder::new()
        .with_task(task("plain").build())
        .with_task(task("q").ask("Pick one").build())
        .engine();

    let r = engine.answer_question("plain", "x")?;
    assert!(!r.success);
    assert!(r.message.contains("not an ask node"));

    assert!(engine.answer_question("q", "first")?.success);
    let r = engine.answer_question("q", "second")?;
    assert!(!r.success);
    assert!(r.message.contains("already been answered"));
    assert_eq!(task_of(&engine, "q").output_result.as_deref(), Some("first"));

    let r = engine.answer_question("missing", "x")?;
    assert!(!r.success);
    assert!(r.message.contains("not found"));

    Ok(())
}

#[test]
fn spawned_nodes_take_part_in_propagation() -> TestResult {
    let mut engine = GraphBuilder::new()
        .with_task(task("A").title("Alpha").build())
        .engine();

    engine.spawn_task(TaskSpec {
        dependencies: vec!["A".into()],
        ..spec("late")
    })?;
    let r = engine.update_task_status("A", TaskStatus::Completed, Some("out".into()))?;

    assert_eq!(r.unblocked_ids(), vec!["late"]);
    assert_eq!(
        task_of(&engine, "late").input_context.as_deref(),
        Some("[From Alpha]: out")
    );

    Ok(())
}
