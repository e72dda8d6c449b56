//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (panels reference existing definitions,
//!   folders reference existing parents)
//! - Reject ids that the URL grammar could not round-trip
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PortalConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::config::schema::PortalConfig;
use crate::url::grammar;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("url.context_path '{0}' must start with '/'")]
    ContextPath(String),

    #[error("url.root_folder_id must not be empty")]
    EmptyRootFolder,

    #[error("observability.log_format '{0}' must be 'pretty' or 'json'")]
    LogFormat(String),

    #[error("duplicate {kind} id '{id}'")]
    Duplicate { kind: &'static str, id: String },

    #[error("folder '{folder}' references unknown parent '{parent}'")]
    UnknownParent { folder: String, parent: String },

    #[error("panel '{panel}' references unknown definition '{definition}'")]
    UnknownDefinition { panel: String, definition: String },

    #[error("channel '{channel}' is placed in both '{first}' and '{second}'")]
    DuplicatePlacement {
        channel: String,
        first: String,
        second: String,
    },

    #[error("{kind} '{value}' cannot be used as a path segment")]
    Segment { kind: &'static str, value: String },
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &PortalConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.url.context_path.starts_with('/') {
        errors.push(ValidationError::ContextPath(config.url.context_path.clone()));
    }
    if config.url.root_folder_id.is_empty() {
        errors.push(ValidationError::EmptyRootFolder);
    }
    if !matches!(config.observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::LogFormat(config.observability.log_format.clone()));
    }

    validate_folders(config, &mut errors);
    validate_registry(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_folders(config: &PortalConfig, errors: &mut Vec<ValidationError>) {
    let mut folder_ids: HashSet<&str> = HashSet::new();
    folder_ids.insert(config.url.root_folder_id.as_str());

    for folder in &config.folders {
        if !folder_ids.insert(folder.id.as_str()) {
            errors.push(ValidationError::Duplicate {
                kind: "folder",
                id: folder.id.clone(),
            });
        }
        if !is_layout_segment(&folder.id) {
            errors.push(ValidationError::Segment {
                kind: "folder id",
                value: folder.id.clone(),
            });
        }
    }

    let mut placements: HashMap<&str, &str> = HashMap::new();
    for folder in &config.folders {
        if let Some(parent) = &folder.parent {
            if !folder_ids.contains(parent.as_str()) {
                errors.push(ValidationError::UnknownParent {
                    folder: folder.id.clone(),
                    parent: parent.clone(),
                });
            }
        }
        for channel in &folder.channels {
            if let Some(first) = placements.insert(channel.as_str(), folder.id.as_str()) {
                errors.push(ValidationError::DuplicatePlacement {
                    channel: channel.clone(),
                    first: first.to_string(),
                    second: folder.id.clone(),
                });
            }
        }
    }
}

fn validate_registry(config: &PortalConfig, errors: &mut Vec<ValidationError>) {
    let mut definition_ids = HashSet::new();
    for definition in &config.definitions {
        if !definition_ids.insert(definition.id.as_str()) {
            errors.push(ValidationError::Duplicate {
                kind: "definition",
                id: definition.id.clone(),
            });
        }
        if !is_panel_half(&definition.fname) {
            errors.push(ValidationError::Segment {
                kind: "fname",
                value: definition.fname.clone(),
            });
        }
    }

    let mut tokens = HashSet::new();
    for panel in &config.panels {
        if !tokens.insert(panel.token.as_str()) {
            errors.push(ValidationError::Duplicate {
                kind: "panel",
                id: panel.token.clone(),
            });
        }
        if !definition_ids.contains(panel.definition_id.as_str()) {
            errors.push(ValidationError::UnknownDefinition {
                panel: panel.token.clone(),
                definition: panel.definition_id.clone(),
            });
        }
        if !is_panel_half(&panel.content_instance_id) {
            errors.push(ValidationError::Segment {
                kind: "content instance id",
                value: panel.content_instance_id.clone(),
            });
        }
    }
}

/// A folder id must not be mistaken for a state token, a panel segment or a marker.
fn is_layout_segment(id: &str) -> bool {
    !id.is_empty()
        && !id.contains('/')
        && grammar::parse_state(id).is_none()
        && grammar::PanelSegment::parse(id).is_none()
        && grammar::parse_marker(id).is_none()
}

fn is_panel_half(value: &str) -> bool {
    !value.is_empty() && !value.contains('/') && !value.contains('.')
}
