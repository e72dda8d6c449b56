//! In-memory collaborators built from configuration fixtures.
//!
//! # Responsibilities
//! - Hold a flat folder tree and the placement of content instances
//! - Hold panels, content instances and content definitions
//!
//! # Design Decisions
//! - `DashMap` so one instance can be shared by concurrent request tasks
//! - A panel's handle id is its window token
//! - Tokens resolve by window token first, then by fname, so that paths built
//!   by the encoder (`<fname>.<id>`) decode back to the same handle

use dashmap::DashMap;

use crate::config::PortalConfig;
use crate::registry::{LayoutNode, LayoutResolver, PanelRegistry};
use crate::url::state::PanelHandle;

/// Layout tree kept in memory.
#[derive(Debug)]
pub struct MemoryLayout {
    root_id: String,
    /// folder id -> parent folder id
    folders: DashMap<String, String>,
    /// content instance id -> folder id
    placements: DashMap<String, String>,
}

impl MemoryLayout {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            root_id: root_id.into(),
            folders: DashMap::new(),
            placements: DashMap::new(),
        }
    }

    /// Build the layout described by the `[[folders]]` tables.
    pub fn from_config(config: &PortalConfig) -> Self {
        let layout = Self::new(config.url.root_folder_id.clone());
        for folder in &config.folders {
            let parent = folder.parent.as_deref().unwrap_or(&config.url.root_folder_id);
            layout.add_folder(&folder.id, parent);
            for channel in &folder.channels {
                layout.place(channel, &folder.id);
            }
        }
        tracing::debug!(
            folders = layout.folders.len(),
            placements = layout.placements.len(),
            "In-memory layout built"
        );
        layout
    }

    pub fn add_folder(&self, id: &str, parent: &str) {
        self.folders.insert(id.to_string(), parent.to_string());
    }

    /// Place a content instance directly inside a folder.
    pub fn place(&self, content_instance_id: &str, folder_id: &str) {
        self.placements
            .insert(content_instance_id.to_string(), folder_id.to_string());
    }
}

impl LayoutResolver for MemoryLayout {
    fn find_deepest_folder_containing(&self, content_instance_id: &str) -> Option<String> {
        self.placements
            .get(content_instance_id)
            .map(|folder| folder.value().clone())
    }

    fn describe_node(&self, layout_node_id: &str) -> Option<LayoutNode> {
        if layout_node_id == self.root_id || self.folders.contains_key(layout_node_id) {
            return Some(LayoutNode {
                id: layout_node_id.to_string(),
                is_folder: true,
            });
        }
        self.placements.contains_key(layout_node_id).then(|| LayoutNode {
            id: layout_node_id.to_string(),
            is_folder: false,
        })
    }
}

#[derive(Debug, Clone)]
struct PanelEntry {
    token: String,
    content_instance_id: String,
}

/// Panel, content instance and content definition registry kept in memory.
#[derive(Debug, Default)]
pub struct MemoryPanelRegistry {
    panels: DashMap<PanelHandle, PanelEntry>,
    tokens: DashMap<String, PanelHandle>,
    /// content instance id -> content definition id
    instances: DashMap<String, String>,
    /// content definition id -> fname
    definitions: DashMap<String, String>,
}

impl MemoryPanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry described by the `[[definitions]]` and `[[panels]]` tables.
    pub fn from_config(config: &PortalConfig) -> Self {
        let registry = Self::new();
        for definition in &config.definitions {
            registry.register_definition(&definition.id, &definition.fname);
        }
        for panel in &config.panels {
            registry.register_panel(&panel.token, &panel.content_instance_id, &panel.definition_id);
        }
        tracing::debug!(
            panels = registry.panels.len(),
            definitions = registry.definitions.len(),
            "In-memory panel registry built"
        );
        registry
    }

    pub fn register_definition(&self, id: &str, fname: &str) {
        self.definitions.insert(id.to_string(), fname.to_string());
    }

    /// Register a panel for a content instance and return its handle.
    pub fn register_panel(
        &self,
        token: &str,
        content_instance_id: &str,
        definition_id: &str,
    ) -> PanelHandle {
        let handle = PanelHandle::new(token);
        self.instances
            .insert(content_instance_id.to_string(), definition_id.to_string());
        self.panels.insert(
            handle.clone(),
            PanelEntry {
                token: token.to_string(),
                content_instance_id: content_instance_id.to_string(),
            },
        );
        self.tokens.insert(token.to_string(), handle.clone());
        handle
    }

    fn resolve_by_fname(&self, fname: &str) -> Option<PanelHandle> {
        self.panels
            .iter()
            .filter(|entry| {
                self.content_definition_id_for(&entry.value().content_instance_id)
                    .and_then(|definition| self.short_name_for(&definition))
                    .is_some_and(|name| name == fname)
            })
            .map(|entry| entry.key().clone())
            .min_by(|a, b| a.as_str().cmp(b.as_str()))
    }
}

impl PanelRegistry for MemoryPanelRegistry {
    fn resolve_token(&self, panel_token: &str) -> Option<PanelHandle> {
        if let Some(handle) = self.tokens.get(panel_token) {
            return Some(handle.value().clone());
        }
        self.resolve_by_fname(panel_token)
    }

    fn token_for(&self, handle: &PanelHandle) -> Option<String> {
        self.panels.get(handle).map(|entry| entry.token.clone())
    }

    fn content_instance_id_for(&self, handle: &PanelHandle) -> Option<String> {
        self.panels
            .get(handle)
            .map(|entry| entry.content_instance_id.clone())
    }

    fn content_definition_id_for(&self, content_instance_id: &str) -> Option<String> {
        self.instances
            .get(content_instance_id)
            .map(|definition| definition.value().clone())
    }

    fn short_name_for(&self, definition_id: &str) -> Option<String> {
        self.definitions
            .get(definition_id)
            .map(|fname| fname.value().clone())
    }
}
