// src/graph/normalize.rs

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::graph::node::TaskNode;
use crate::types::TaskId;

/// Compute the symmetric closure of `dependencies` / `unblocks` edges.
///
/// For every `b` listing `a` in `dependencies`, `a` ends up listing `b` in
/// `unblocks`, and vice versa. Missing edges are added silently; references to
/// unknown ids are left alone for the validator to report. Repeated ids inside
/// one edge list are collapsed, keeping the first occurrence.
///
/// Never mutates the input, and `normalize(normalize(g)) == normalize(g)`.
pub fn normalize(tasks: &[TaskNode]) -> Vec<TaskNode> {
    let mut out: Vec<TaskNode> = tasks.to_vec();

    let mut index: HashMap<TaskId, usize> = HashMap::with_capacity(out.len());
    for (pos, task) in out.iter().enumerate() {
        index.entry(task.id.clone()).or_insert(pos);
    }

    for task in out.iter_mut() {
        dedup_in_order(&mut task.dependencies);
        dedup_in_order(&mut task.unblocks);
    }

    // (position to edit, id to push into its unblocks / dependencies)
    let mut add_unblocks: Vec<(usize, TaskId)> = Vec::new();
    let mut add_dependencies: Vec<(usize, TaskId)> = Vec::new();

    for task in &out {
        for dep in &task.dependencies {
            if let Some(&pos) = index.get(dep) {
                add_unblocks.push((pos, task.id.clone()));
            }
        }
        for target in &task.unblocks {
            if let Some(&pos) = index.get(target) {
                add_dependencies.push((pos, task.id.clone()));
            }
        }
    }

    let mut added = 0usize;
    for (pos, id) in add_unblocks {
        if push_unique(&mut out[pos].unblocks, id) {
            added += 1;
        }
    }
    for (pos, id) in add_dependencies {
        if push_unique(&mut out[pos].dependencies, id) {
            added += 1;
        }
    }

    if added > 0 {
        debug!(added, "normalization added missing reverse edges");
    }

    out
}

fn dedup_in_order(ids: &mut Vec<TaskId>) {
    let mut seen: HashSet<TaskId> = HashSet::with_capacity(ids.len());
    ids.retain(|id| seen.insert(id.clone()));
}

fn push_unique(ids: &mut Vec<TaskId>, id: TaskId) -> bool {
    if ids.contains(&id) {
        false
    } else {
        ids.push(id);
        true
    }
}
