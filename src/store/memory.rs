// src/store/memory.rs

use tracing::debug;

use crate::errors::Result;
use crate::graph::TaskGraph;
use crate::store::{GraphStore, Snapshot, check_revision};

/// Keeps the snapshot in memory only (lost when dropped).
#[derive(Debug, Clone, Default)]
pub struct MemoryGraphStore {
    snapshot: Snapshot,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.snapshot.graph
    }

    pub fn revision(&self) -> u64 {
        self.snapshot.revision
    }
}

impl GraphStore for MemoryGraphStore {
    fn load(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }

    fn replace(&mut self, expected_revision: u64, graph: TaskGraph) -> Result<u64> {
        check_revision(expected_revision, self.snapshot.revision)?;
        self.snapshot = Snapshot {
            revision: expected_revision + 1,
            graph,
        };
        debug!(revision = self.snapshot.revision, tasks = self.snapshot.graph.len(), "stored graph (memory)");
        Ok(self.snapshot.revision)
    }
}
