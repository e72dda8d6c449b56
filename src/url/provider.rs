//! Request-facing entry point of the URL codec.
//!
//! # Responsibilities
//! - Decode the navigation state of an inbound request, once per request
//! - Generate canonical panel URLs for outbound links
//!
//! # Design Decisions
//! - Collaborators are shared trait objects; the provider is cheap to clone
//! - The context path comes from configuration unless the caller overrides it

use axum::http::Request;
use std::sync::Arc;

use crate::config::{PortalConfig, UrlConfig};
use crate::observability::metrics;
use crate::registry::{LayoutResolver, MemoryLayout, MemoryPanelRegistry, PanelRegistry};
use crate::url::cache;
use crate::url::decoder;
use crate::url::encoder::Encoder;
use crate::url::error::UrlError;
use crate::url::state::{NavigationState, PanelHandle, PortletUrl};

/// Decodes inbound portal paths and encodes outbound panel links.
#[derive(Clone)]
pub struct PortalUrlProvider {
    layout: Arc<dyn LayoutResolver>,
    registry: Arc<dyn PanelRegistry>,
    config: UrlConfig,
}

impl PortalUrlProvider {
    pub fn new(
        layout: Arc<dyn LayoutResolver>,
        registry: Arc<dyn PanelRegistry>,
        config: UrlConfig,
    ) -> Self {
        Self {
            layout,
            registry,
            config,
        }
    }

    /// Provider backed by the in-memory collaborators described in `config`.
    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(
            Arc::new(MemoryLayout::from_config(config)),
            Arc::new(MemoryPanelRegistry::from_config(config)),
            config.url.clone(),
        )
    }

    pub fn config(&self) -> &UrlConfig {
        &self.config
    }

    pub fn registry(&self) -> &dyn PanelRegistry {
        self.registry.as_ref()
    }

    /// Navigation state of `request`, decoded on first use and cached on the
    /// request for every later call.
    pub fn request_info<B>(
        &self,
        request: &mut Request<B>,
    ) -> Result<Arc<NavigationState>, UrlError> {
        let path = request.uri().path().to_string();
        cache::get_or_decode(request.extensions_mut(), || self.decode_path(&path))
    }

    /// Decode a path against the configured context path, bypassing the cache.
    pub fn decode_path(&self, path: &str) -> Result<NavigationState, UrlError> {
        let result = decoder::decode(self.registry.as_ref(), &self.config.context_path, path);
        match &result {
            Ok(_) => metrics::record_decode("ok"),
            Err(err) => {
                metrics::record_decode(err.kind());
                tracing::debug!(path = %path, error = %err, "Rejected portal path");
            }
        }
        result
    }

    /// Canonical URL for `target` under the configured context path.
    pub fn portlet_url(
        &self,
        target: &PortletUrl,
        panel: Option<&PanelHandle>,
    ) -> Result<String, UrlError> {
        self.portlet_url_in(&self.config.context_path, target, panel)
    }

    /// Canonical URL for `target` under an explicit context path.
    pub fn portlet_url_in(
        &self,
        context_prefix: &str,
        target: &PortletUrl,
        panel: Option<&PanelHandle>,
    ) -> Result<String, UrlError> {
        Encoder::new(self.layout.as_ref(), self.registry.as_ref(), &self.config)
            .encode(context_prefix, target, panel)
    }
}

impl std::fmt::Debug for PortalUrlProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalUrlProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
