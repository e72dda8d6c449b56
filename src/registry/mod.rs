//! Collaborator contracts consumed by the URL codec.
//!
//! # Data Flow
//! ```text
//! decode:  panel token ──▶ PanelRegistry::resolve_token ──▶ PanelHandle
//!
//! encode:  PanelHandle ──▶ PanelRegistry (token, content instance, definition, fname)
//!                      ──▶ LayoutResolver (deepest folder, node description)
//! ```
//!
//! # Design Decisions
//! - Two narrow traits so the codec can be tested against stubs
//! - Lookups are synchronous and side-effect free; a miss is `None`
//! - Implementations must be `Send + Sync` so they can be shared via `Arc`

pub mod memory;

use crate::url::state::PanelHandle;

pub use memory::{MemoryLayout, MemoryPanelRegistry};

/// Description of one layout-tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    pub id: String,
    pub is_folder: bool,
}

/// Read access to the user's layout tree.
pub trait LayoutResolver: Send + Sync {
    /// Id of the deepest folder containing the given content instance, or
    /// `None` when the instance is not placed in the layout.
    fn find_deepest_folder_containing(&self, content_instance_id: &str) -> Option<String>;

    /// Describe a layout node by id.
    fn describe_node(&self, layout_node_id: &str) -> Option<LayoutNode>;
}

/// Read access to panels, content instances and content definitions.
pub trait PanelRegistry: Send + Sync {
    /// Resolve a URL panel token to its handle.
    fn resolve_token(&self, panel_token: &str) -> Option<PanelHandle>;

    /// Token identifying the handle in outbound control parameters.
    fn token_for(&self, handle: &PanelHandle) -> Option<String>;

    fn content_instance_id_for(&self, handle: &PanelHandle) -> Option<String>;

    fn content_definition_id_for(&self, content_instance_id: &str) -> Option<String>;

    /// Human-readable short name ("fname") of a content definition.
    fn short_name_for(&self, definition_id: &str) -> Option<String>;
}
