// src/engine/mod.rs

//! Command surface of the task graph engine.
//!
//! - [`core`] holds [`Engine`], one method per command.
//! - [`command`] defines the serializable [`Command`] enum and its dispatcher,
//!   for drivers that hand commands over as JSON.
//! - [`response`] defines the structured [`CommandResponse`].
//!
//! The engine assumes commands arrive one at a time. Each mutating command is
//! a single read / compute / replace against the store.

pub mod command;
pub mod core;
pub mod response;

pub use command::{Command, NewTaskArgs};
pub use self::core::Engine;
pub use response::CommandResponse;

use crate::config::ConfigSection;
use crate::graph::DEFAULT_TITLE_LENGTH;
use crate::render::RenderOptions;

/// Engine options, usually derived from the `[config]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub render: RenderOptions,
    /// Characters of a question kept in an ask node's derived title.
    pub title_length: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            title_length: DEFAULT_TITLE_LENGTH,
        }
    }
}

impl From<&ConfigSection> for EngineOptions {
    fn from(section: &ConfigSection) -> Self {
        Self {
            render: section.render_options(),
            title_length: section.title_length,
        }
    }
}
