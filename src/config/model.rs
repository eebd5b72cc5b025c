// src/config/model.rs

use serde::Deserialize;

use crate::graph::{DEFAULT_TITLE_LENGTH, TaskSpec};
use crate::render::{DEFAULT_PREVIEW_LENGTH, RenderOptions};
use crate::store::DEFAULT_STATE_FILE;

/// Configuration as read from `Taskweave.toml`, before validation.
///
/// ```toml
/// [config]
/// state_file = ".taskweave/graph.json"
/// preview_length = 100
/// title_length = 60
///
/// [[task]]
/// id = "audit"
/// title = "Audit current system"
/// unblocks = ["ask_scale"]
///
/// [[task]]
/// id = "analysis"
/// node_type = "fork"
/// dependencies = ["research"]
/// ```
///
/// Every section is optional. `[[task]]` entries keep their declaration
/// order, which becomes the graph order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub task: Vec<TaskSpec>,
}

/// A `RawConfigFile` that passed [`crate::config::validate_config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: Vec<TaskSpec>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, task: Vec<TaskSpec>) -> Self {
        Self { config, task }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConfigSection {
    /// Where the CLI keeps the graph snapshot between invocations.
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Characters of `output_result` shown by the tree and status views.
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,

    /// Characters of a question kept in an ask node's derived title.
    #[serde(default = "default_title_length")]
    pub title_length: usize,
}

fn default_state_file() -> String {
    DEFAULT_STATE_FILE.to_string()
}

fn default_preview_length() -> usize {
    DEFAULT_PREVIEW_LENGTH
}

fn default_title_length() -> usize {
    DEFAULT_TITLE_LENGTH
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            preview_length: default_preview_length(),
            title_length: default_title_length(),
        }
    }
}

impl ConfigSection {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            preview_length: self.preview_length,
        }
    }
}
