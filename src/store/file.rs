// src/store/file.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Result;
use crate::graph::{TaskGraph, TaskNode};
use crate::store::{GraphStore, Snapshot, check_revision};

/// Default location of the state file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = ".taskweave/graph.json";

/// On-disk layout: `{ "revision": n, "tasks": [...] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    revision: u64,
    #[serde(default)]
    tasks: Vec<TaskNode>,
}

/// Stores the snapshot as a JSON file.
///
/// A missing file reads as an empty graph at revision 0. Writes go to a
/// sibling temp file that is then renamed over the target, so readers see
/// either the old or the new snapshot, never a partial one.
#[derive(Debug, Clone)]
pub struct FileGraphStore {
    path: PathBuf,
}

impl FileGraphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<StateFile> {
        if !self.path.exists() {
            return Ok(StateFile::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("reading graph state at {:?}", self.path))?;
        let state: StateFile = serde_json::from_str(&contents)?;
        Ok(state)
    }

    fn write_state(&self, state: &StateFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating state directory at {:?}", parent))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&tmp, json).with_context(|| format!("writing graph state to {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("moving {:?} into place at {:?}", tmp, self.path))?;
        Ok(())
    }
}

impl GraphStore for FileGraphStore {
    fn load(&self) -> Result<Snapshot> {
        let state = self.read_state()?;
        debug!(path = ?self.path, revision = state.revision, tasks = state.tasks.len(), "loaded graph (file)");
        Ok(Snapshot {
            revision: state.revision,
            graph: TaskGraph::from_tasks(state.tasks),
        })
    }

    fn replace(&mut self, expected_revision: u64, graph: TaskGraph) -> Result<u64> {
        let current = self.read_state()?;
        check_revision(expected_revision, current.revision)?;

        let state = StateFile {
            revision: expected_revision + 1,
            tasks: graph.into_tasks(),
        };
        self.write_state(&state)?;
        info!(path = ?self.path, revision = state.revision, tasks = state.tasks.len(), "stored graph (file)");
        Ok(state.revision)
    }
}
