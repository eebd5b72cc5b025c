// src/config/validate.rs

use crate::config::model::{ConfigFile, ConfigSection, RawConfigFile};
use crate::errors::{Result, TaskweaveError};
use crate::graph::{TaskNode, TaskSpec, normalize, validate_tasks};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TaskweaveError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_settings(&cfg.config)?;
    validate_declared_graph(&cfg.task)?;
    Ok(())
}

fn validate_settings(section: &ConfigSection) -> Result<()> {
    if section.preview_length == 0 {
        return Err(TaskweaveError::ConfigError(
            "[config].preview_length must be >= 1 (got 0)".to_string(),
        ));
    }
    if section.title_length == 0 {
        return Err(TaskweaveError::ConfigError(
            "[config].title_length must be >= 1 (got 0)".to_string(),
        ));
    }
    if section.state_file.trim().is_empty() {
        return Err(TaskweaveError::ConfigError(
            "[config].state_file must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Run the declared `[[task]]` list through the same normalize + validate
/// pipeline `generateTaskGraph` uses, so a broken file fails at load time.
fn validate_declared_graph(specs: &[TaskSpec]) -> Result<()> {
    let nodes: Vec<TaskNode> = specs.iter().cloned().map(TaskSpec::into_node).collect();
    let errors = validate_tasks(&normalize(&nodes));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TaskweaveError::ConfigError(format!(
            "invalid [[task]] graph: {}",
            errors.join("; ")
        )))
    }
}
