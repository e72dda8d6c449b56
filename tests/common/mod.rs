//! Shared collaborator stubs for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use portal_url::registry::{LayoutNode, LayoutResolver, PanelRegistry};
use portal_url::PanelHandle;

/// Layout stub that counts every lookup.
#[derive(Default)]
pub struct CountingLayout {
    /// content instance id -> deepest folder id
    pub placements: HashMap<String, String>,
    pub nodes: HashMap<String, LayoutNode>,
    pub calls: AtomicUsize,
}

impl CountingLayout {
    pub fn with_folder(mut self, content_instance_id: &str, folder_id: &str) -> Self {
        self.placements
            .insert(content_instance_id.to_string(), folder_id.to_string());
        self.nodes.insert(
            folder_id.to_string(),
            LayoutNode {
                id: folder_id.to_string(),
                is_folder: true,
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LayoutResolver for CountingLayout {
    fn find_deepest_folder_containing(&self, content_instance_id: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.placements.get(content_instance_id).cloned()
    }

    fn describe_node(&self, layout_node_id: &str) -> Option<LayoutNode> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.nodes.get(layout_node_id).cloned()
    }
}

/// Registry stub holding a single panel, counting every lookup.
pub struct CountingRegistry {
    pub handle: PanelHandle,
    pub token: String,
    pub fname: String,
    pub content_instance_id: String,
    pub definition_id: String,
    pub resolve_calls: AtomicUsize,
    pub calls: AtomicUsize,
}

impl CountingRegistry {
    pub fn new(token: &str, fname: &str, content_instance_id: &str) -> Self {
        Self {
            handle: PanelHandle::new(format!("window-{token}")),
            token: token.to_string(),
            fname: fname.to_string(),
            content_instance_id: content_instance_id.to_string(),
            definition_id: "42".to_string(),
            resolve_calls: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// The weather panel used throughout the tests: token `target`,
    /// fname `weather`, content instance `31`.
    pub fn weather() -> Self {
        Self::new("target", "weather", "31")
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl PanelRegistry for CountingRegistry {
    fn resolve_token(&self, panel_token: &str) -> Option<PanelHandle> {
        self.hit();
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        (panel_token == self.token || panel_token == self.fname).then(|| self.handle.clone())
    }

    fn token_for(&self, handle: &PanelHandle) -> Option<String> {
        self.hit();
        (*handle == self.handle).then(|| self.token.clone())
    }

    fn content_instance_id_for(&self, handle: &PanelHandle) -> Option<String> {
        self.hit();
        (*handle == self.handle).then(|| self.content_instance_id.clone())
    }

    fn content_definition_id_for(&self, content_instance_id: &str) -> Option<String> {
        self.hit();
        (content_instance_id == self.content_instance_id).then(|| self.definition_id.clone())
    }

    fn short_name_for(&self, definition_id: &str) -> Option<String> {
        self.hit();
        (definition_id == self.definition_id).then(|| self.fname.clone())
    }
}
