#![allow(dead_code)]

use taskweave::engine::{Engine, EngineOptions};
use taskweave::graph::{TaskGraph, TaskNode, TaskSpec, normalize};
use taskweave::store::MemoryGraphStore;
use taskweave::types::NodeType;

/// Builder for a list of `TaskSpec`s to simplify test setup.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    specs: Vec<TaskSpec>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(mut self, spec: TaskSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn specs(self) -> Vec<TaskSpec> {
        self.specs
    }

    /// Normalized nodes, without validation.
    pub fn nodes(self) -> Vec<TaskNode> {
        let nodes: Vec<TaskNode> = self.specs.into_iter().map(TaskSpec::into_node).collect();
        normalize(&nodes)
    }

    pub fn graph(self) -> TaskGraph {
        TaskGraph::from_tasks(self.nodes())
    }

    /// An engine over a fresh in-memory store seeded through
    /// `generate_task_graph`.
    pub fn engine(self) -> Engine<MemoryGraphStore> {
        let mut engine = Engine::new(MemoryGraphStore::new(), EngineOptions::default());
        let response = engine
            .generate_task_graph(self.specs)
            .expect("in-memory store never fails");
        assert!(response.success, "test graph rejected: {}", response.message);
        engine
    }
}

/// Builder for `TaskSpec`.
pub struct TaskSpecBuilder {
    spec: TaskSpec,
}

impl TaskSpecBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            spec: TaskSpec::new(id, format!("Task {id}")),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.spec.title = title.to_string();
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.spec.dependencies.push(dep.to_string());
        self
    }

    pub fn unblocks(mut self, target: &str) -> Self {
        self.spec.unblocks.push(target.to_string());
        self
    }

    pub fn fork(mut self) -> Self {
        self.spec.node_type = NodeType::Fork;
        self
    }

    pub fn ask(mut self, question: &str) -> Self {
        self.spec.node_type = NodeType::Ask;
        self.spec.question = Some(question.to_string());
        self
    }

    pub fn option(mut self, option: &str) -> Self {
        self.spec
            .answer_options
            .get_or_insert_with(Vec::new)
            .push(option.to_string());
        self
    }

    pub fn capability(mut self, capability: &str) -> Self {
        self.spec.required_capabilities.push(capability.to_string());
        self
    }

    pub fn subagent(mut self, agent: &str) -> Self {
        self.spec.assigned_subagent = Some(agent.to_string());
        self
    }

    pub fn build(self) -> TaskSpec {
        self.spec
    }
}

/// Shorthand for `TaskSpecBuilder::new(id)`.
pub fn task(id: &str) -> TaskSpecBuilder {
    TaskSpecBuilder::new(id)
}
