#![allow(dead_code)]

pub use taskweave_test_utils::builders;
#[allow(unused_imports)]
pub use taskweave_test_utils::init_tracing;

use taskweave::engine::Engine;
use taskweave::graph::TaskNode;
use taskweave::store::MemoryGraphStore;

/// Look up a task in the engine's current graph, panicking if absent.
pub fn task_of(engine: &Engine<MemoryGraphStore>, id: &str) -> TaskNode {
    engine
        .store()
        .graph()
        .get(id)
        .cloned()
        .unwrap_or_else(|| panic!("task '{id}' not in graph"))
}

/// Ids of the currently ready tasks, in graph order.
pub fn ready_ids(engine: &Engine<MemoryGraphStore>) -> Vec<String> {
    let response = engine.get_unblocked_tasks().expect("memory store");
    response
        .tasks
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.id)
        .collect()
}
