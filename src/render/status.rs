// src/render/status.rs

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::graph::node::{TaskNode, truncate_chars};
use crate::graph::resolver::{unblocked, unmet_dependencies};
use crate::graph::snapshot::TaskGraph;
use crate::render::{RenderOptions, node_type_tag};
use crate::types::TaskStatus;

/// Build the status block for the driving agent's context.
///
/// Sections (empty ones are omitted): Ready to Start, Blocked/Pending,
/// In Progress, Completed, Failed, Pending Human Questions.
///
/// Returns `None` for an empty graph.
pub fn status_report(graph: &TaskGraph, options: RenderOptions) -> Option<String> {
    if graph.is_empty() {
        return None;
    }

    let counts = graph.status_counts();
    let mut out = String::from("## Task Graph Status\n");
    let _ = writeln!(
        out,
        "{} tasks: {} completed, {} in progress, {} pending, {} failed",
        counts.total(),
        counts.completed,
        counts.in_progress,
        counts.pending,
        counts.failed
    );

    let ready = unblocked(graph);
    let ready_ids: HashSet<&str> = ready.iter().map(|t| t.id.as_str()).collect();

    let lines: Vec<String> = ready.iter().map(|t| task_label(t)).collect();
    push_section(&mut out, "Ready to Start", &lines);

    let lines: Vec<String> = with_status(graph, TaskStatus::Pending)
        .filter(|t| !ready_ids.contains(t.id.as_str()))
        .map(|t| {
            format!(
                "{} - waiting on: {}",
                task_label(t),
                unmet_dependencies(graph, t).join(", ")
            )
        })
        .collect();
    push_section(&mut out, "Blocked/Pending", &lines);

    let lines: Vec<String> = with_status(graph, TaskStatus::InProgress)
        .map(|t| match &t.assigned_subagent {
            Some(agent) => format!("{} (assigned: {agent})", task_label(t)),
            None => task_label(t),
        })
        .collect();
    push_section(&mut out, "In Progress", &lines);

    let lines: Vec<String> = with_status(graph, TaskStatus::Completed)
        .map(|t| match &t.output_result {
            Some(result) => format!(
                "{}: {}",
                task_label(t),
                truncate_chars(result, options.preview_length).replace('\n', " ")
            ),
            None => task_label(t),
        })
        .collect();
    push_section(&mut out, "Completed", &lines);

    let lines: Vec<String> = with_status(graph, TaskStatus::Failed)
        .map(task_label)
        .collect();
    push_section(&mut out, "Failed", &lines);

    let lines: Vec<String> = graph
        .tasks()
        .iter()
        .filter(|t| t.is_open_question())
        .map(|t| {
            let question = t.question.as_deref().unwrap_or(&t.description);
            match t.answer_options.as_ref().filter(|o| !o.is_empty()) {
                Some(opts) => format!("[{}] {question} (options: {})", t.id, opts.join(" | ")),
                None => format!("[{}] {question}", t.id),
            }
        })
        .collect();
    push_section(&mut out, "Pending Human Questions", &lines);

    Some(out.trim_end().to_string())
}

fn with_status(graph: &TaskGraph, status: TaskStatus) -> impl Iterator<Item = &TaskNode> {
    graph.tasks().iter().filter(move |t| t.status == status)
}

fn task_label(task: &TaskNode) -> String {
    format!("{}{} ({})", node_type_tag(task.node_type), task.title, task.id)
}

fn push_section(out: &mut String, heading: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n### {heading}");
    for line in lines {
        let _ = writeln!(out, "- {line}");
    }
}
