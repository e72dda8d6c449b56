//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the portal
//! URL service. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the portal URL service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// URL grammar settings.
    pub url: UrlConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Layout folders for the in-memory layout.
    pub folders: Vec<FolderConfig>,

    /// Panels for the in-memory panel registry.
    pub panels: Vec<PanelConfig>,

    /// Content definitions for the in-memory panel registry.
    pub definitions: Vec<DefinitionConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Settings shared by the decoder and the encoder.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct UrlConfig {
    /// Mount point of the portal, e.g. "/uPortal/".
    pub context_path: String,

    /// Id of the layout root; panels placed directly in it get no folder segment.
    pub root_folder_id: String,

    /// Leave the `normal` state token out of generated paths.
    pub elide_normal_state: bool,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            context_path: "/uPortal/".to_string(),
            root_folder_id: "root".to_string(),
            elide_normal_state: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A layout folder.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FolderConfig {
    /// Folder id, used as the layout path segment.
    pub id: String,

    /// Parent folder id (default: the root folder).
    #[serde(default)]
    pub parent: Option<String>,

    /// Content instance ids placed directly in this folder.
    #[serde(default)]
    pub channels: Vec<String>,
}

/// A panel (portlet window) bound to a content instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PanelConfig {
    /// Window token, emitted as `pltc_target`.
    pub token: String,

    /// Content instance (channel subscribe) id.
    pub content_instance_id: String,

    /// Content definition the instance is based on.
    pub definition_id: String,
}

/// A content definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefinitionConfig {
    pub id: String,

    /// Short name used in panel path segments.
    pub fname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: PortalConfig = toml::from_str("").unwrap();
        assert_eq!(config.url.context_path, "/uPortal/");
        assert_eq!(config.url.root_folder_id, "root");
        assert!(!config.url.elide_normal_state);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.folders.is_empty());
    }

    #[test]
    fn test_fixture_tables() {
        let config: PortalConfig = toml::from_str(
            r#"
            [url]
            context_path = "/p/"

            [[folders]]
            id = "home"
            channels = ["31"]

            [[folders]]
            id = "subtab"
            parent = "home"

            [[definitions]]
            id = "42"
            fname = "weather"

            [[panels]]
            token = "target"
            content_instance_id = "31"
            definition_id = "42"
            "#,
        )
        .unwrap();
        assert_eq!(config.url.context_path, "/p/");
        assert_eq!(config.url.root_folder_id, "root");
        assert_eq!(config.folders.len(), 2);
        assert_eq!(config.folders[0].parent, None);
        assert_eq!(config.folders[1].parent.as_deref(), Some("home"));
        assert_eq!(config.panels[0].token, "target");
        assert_eq!(config.definitions[0].fname, "weather");
    }
}
