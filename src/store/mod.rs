// src/store/mod.rs

//! Snapshot storage for the task graph.
//!
//! The engine never owns storage; it reads a [`Snapshot`] from a
//! [`GraphStore`], computes a new graph and hands it back with the revision it
//! started from. A store that has moved on since then rejects the write with
//! [`TaskweaveError::StaleSnapshot`], so concurrent drivers cannot silently
//! discard each other's updates.

pub mod file;
pub mod memory;

pub use file::{DEFAULT_STATE_FILE, FileGraphStore};
pub use memory::MemoryGraphStore;

use crate::errors::{Result, TaskweaveError};
use crate::graph::TaskGraph;

/// The graph as read from a store, tagged with the store revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub revision: u64,
    pub graph: TaskGraph,
}

/// Abstract storage for the canonical task collection.
pub trait GraphStore {
    /// Read the current snapshot.
    fn load(&self) -> Result<Snapshot>;

    /// Replace the whole graph if the store is still at `expected_revision`.
    ///
    /// Returns the new revision.
    fn replace(&mut self, expected_revision: u64, graph: TaskGraph) -> Result<u64>;
}

impl<S: GraphStore + ?Sized> GraphStore for &mut S {
    fn load(&self) -> Result<Snapshot> {
        (**self).load()
    }

    fn replace(&mut self, expected_revision: u64, graph: TaskGraph) -> Result<u64> {
        (**self).replace(expected_revision, graph)
    }
}

pub(crate) fn check_revision(expected: u64, actual: u64) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(TaskweaveError::StaleSnapshot { expected, actual })
    }
}
