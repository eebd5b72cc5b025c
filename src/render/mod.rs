// src/render/mod.rs

//! Human-readable views of a task graph.
//!
//! - [`tree`] renders the dependency forest plus a one-line summary.
//! - [`status`] renders the grouped status block injected into the driving
//!   agent's context.
//!
//! Both are read-only and safe to call as often as needed.

pub mod status;
pub mod tree;

pub use status::status_report;
pub use tree::{RenderedTree, render_tree};

use crate::types::{NodeType, TaskStatus};

/// Default character budget for `output_result` previews.
pub const DEFAULT_PREVIEW_LENGTH: usize = 100;

/// Knobs shared by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub preview_length: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

pub(crate) fn status_glyph(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "○",
        TaskStatus::InProgress => "◐",
        TaskStatus::Completed => "●",
        TaskStatus::Failed => "✗",
    }
}

/// `"[fork] "` / `"[ask] "`; spawn nodes carry no tag.
pub(crate) fn node_type_tag(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Spawn => "",
        NodeType::Fork => "[fork] ",
        NodeType::Ask => "[ask] ",
    }
}
