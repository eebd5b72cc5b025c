mod common;
use crate::common::builders::{GraphBuilder, task};

use std::error::Error;

use tempfile::TempDir;

use taskweave::engine::{Engine, EngineOptions};
use taskweave::errors::TaskweaveError;
use taskweave::graph::TaskGraph;
use taskweave::store::{FileGraphStore, GraphStore, MemoryGraphStore};
use taskweave::types::TaskStatus;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn memory_store_bumps_revision_per_commit() -> TestResult {
    let mut store = MemoryGraphStore::new();
    assert_eq!(store.revision(), 0);

    let rev = store.replace(0, GraphBuilder::new().with_task(task("a").build()).graph())?;
    assert_eq!(rev, 1);
    assert_eq!(store.load()?.graph.len(), 1);

    Ok(())
}

#[test]
fn stale_revision_is_rejected() -> TestResult {
    let mut store = MemoryGraphStore::new();
    store.replace(0, TaskGraph::new())?;

    match store.replace(0, TaskGraph::new()) {
        Err(TaskweaveError::StaleSnapshot { expected, actual }) => {
            assert_eq!(expected, 0);
            assert_eq!(actual, 1);
        }
        other => panic!("expected stale snapshot error, got {other:?}"),
    }

    Ok(())
}

#[test]
fn engine_can_borrow_a_caller_owned_store() -> TestResult {
    let mut store = MemoryGraphStore::new();
    {
        let mut engine = Engine::new(&mut store, EngineOptions::default());
        engine.generate_task_graph(vec![task("a").build(), task("b").after("a").build()])?;
        engine.update_task_status("a", TaskStatus::Completed, Some("x".into()))?;
    }

    assert_eq!(store.revision(), 2);
    let b = store.graph().get("b").expect("b");
    assert_eq!(b.input_context.as_deref(), Some("[From Task a]: x"));

    Ok(())
}

#[test]
fn file_store_round_trips_through_json() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("nested").join("graph.json");

    let mut engine = Engine::new(FileGraphStore::new(&path), EngineOptions::default());
    assert!(engine.graph()?.is_empty(), "missing file reads as empty graph");

    engine.generate_task_graph(vec![
        task("a").build(),
        task("b").after("a").fork().build(),
    ])?;
    engine.update_task_status("a", TaskStatus::Completed, Some("out".into()))?;

    let reopened = FileGraphStore::new(&path);
    let snapshot = reopened.load()?;
    assert_eq!(snapshot.revision, 2);
    assert_eq!(snapshot.graph.ids(), vec!["a", "b"]);
    let b = snapshot.graph.get("b").expect("b");
    assert_eq!(b.input_context.as_deref(), Some("[From Task a]: out"));
    assert_eq!(b.unblocks, Vec::<String>::new());
    assert_eq!(snapshot.graph.get("a").map(|a| a.unblocks.clone()), Some(vec!["b".to_string()]));

    assert!(!path.with_extension("json.tmp").exists());

    Ok(())
}

#[test]
fn file_store_detects_concurrent_writers() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("graph.json");

    let mut first = FileGraphStore::new(&path);
    let mut second = FileGraphStore::new(&path);

    let seen_by_second = second.load()?.revision;
    first.replace(0, GraphBuilder::new().with_task(task("a").build()).graph())?;

    let err = second
        .replace(seen_by_second, TaskGraph::new())
        .expect_err("second writer is stale");
    assert!(matches!(err, TaskweaveError::StaleSnapshot { expected: 0, actual: 1 }));
    assert_eq!(first.load()?.graph.len(), 1);

    Ok(())
}

#[test]
fn corrupt_state_file_is_a_host_error() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("graph.json");
    std::fs::write(&path, "{ not json")?;

    let engine = Engine::new(FileGraphStore::new(&path), EngineOptions::default());
    assert!(matches!(engine.get_unblocked_tasks(), Err(TaskweaveError::JsonError(_))));

    Ok(())
}
