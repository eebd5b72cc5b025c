// src/render/tree.rs

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::graph::node::{TaskNode, truncate_chars};
use crate::graph::resolver::unmet_dependencies;
use crate::graph::snapshot::TaskGraph;
use crate::render::{RenderOptions, node_type_tag, status_glyph};
use crate::types::TaskStatus;

/// Output of [`render_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTree {
    pub tree: String,
    pub summary: String,
}

/// Render the graph as an indented forest.
///
/// Roots are tasks without dependencies, in graph order. A task's children
/// are the tasks listing it in `dependencies`, in graph order. A task with
/// several parents is printed once, under the first parent that reaches it.
pub fn render_tree(graph: &TaskGraph, options: RenderOptions) -> RenderedTree {
    let summary = summary_line(graph);

    if graph.is_empty() {
        return RenderedTree {
            tree: "(no tasks)".to_string(),
            summary,
        };
    }

    let mut children: HashMap<&str, Vec<&TaskNode>> = HashMap::new();
    for task in graph.tasks() {
        for dep in &task.dependencies {
            children.entry(dep.as_str()).or_default().push(task);
        }
    }

    let mut out = String::new();
    let mut visited: HashSet<&str> = HashSet::new();

    // Explicit DFS stack; children go on in reverse so they pop in graph order.
    let mut stack: Vec<(&TaskNode, usize)> = graph
        .tasks()
        .iter()
        .filter(|t| t.dependencies.is_empty())
        .rev()
        .map(|t| (t, 0))
        .collect();

    while let Some((task, depth)) = stack.pop() {
        if !visited.insert(task.id.as_str()) {
            continue;
        }
        render_line(graph, task, depth, options, &mut out);

        if let Some(kids) = children.get(task.id.as_str()) {
            stack.extend(
                kids.iter()
                    .rev()
                    .filter(|k| !visited.contains(k.id.as_str()))
                    .map(|&k| (k, depth + 1)),
            );
        }
    }

    RenderedTree {
        tree: out.trim_end().to_string(),
        summary,
    }
}

fn render_line(
    graph: &TaskGraph,
    task: &TaskNode,
    depth: usize,
    options: RenderOptions,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    let _ = write!(
        out,
        "{indent}{} {}{} ({})",
        status_glyph(task.status),
        node_type_tag(task.node_type),
        task.title,
        task.id
    );

    if task.status == TaskStatus::Pending {
        let unmet = unmet_dependencies(graph, task);
        if !unmet.is_empty() {
            let _ = write!(out, " [waiting on: {}]", unmet.join(", "));
        }
    }
    out.push('\n');

    if task.is_open_question() {
        if let Some(question) = &task.question {
            let _ = writeln!(out, "{indent}    ? {question}");
        }
        if let Some(options) = task.answer_options.as_ref().filter(|o| !o.is_empty()) {
            let _ = writeln!(out, "{indent}    options: {}", options.join(" | "));
        }
    }

    if task.status == TaskStatus::Completed {
        if let Some(result) = &task.output_result {
            let preview = truncate_chars(result, options.preview_length).replace('\n', " ");
            let _ = writeln!(out, "{indent}    => {preview}");
        }
    }
}

fn summary_line(graph: &TaskGraph) -> String {
    let counts = graph.status_counts();
    format!(
        "Total: {} | pending: {} | in_progress: {} | completed: {} | failed: {} | unanswered questions: {}",
        counts.total(),
        counts.pending,
        counts.in_progress,
        counts.completed,
        counts.failed,
        counts.open_questions
    )
}
