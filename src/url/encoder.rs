//! Outbound URL generation.
//!
//! # Responsibilities
//! - Resolve the fname, content instance and containing folder of a panel
//! - Build the canonical path and query string for a `PortletUrl`
//!
//! # Design Decisions
//! - Collaborator calls run in a fixed order, each feeding the next
//! - Any lookup miss fails the whole call; no partial URL is returned
//! - Only the deepest containing folder is emitted, never the ancestor chain

use url::form_urlencoded;

use crate::config::UrlConfig;
use crate::observability::metrics;
use crate::registry::{LayoutResolver, PanelRegistry};
use crate::url::error::UrlError;
use crate::url::grammar::{
    self, PanelSegment, MODE_PARAM, PORTAL_PARAM_PREFIX, PORTLET_PARAM_PREFIX, TARGET_PARAM,
};
use crate::url::state::{PanelHandle, PortletMode, PortletUrl, UrlState};

/// Builds canonical portal URLs for panels.
pub struct Encoder<'a> {
    layout: &'a dyn LayoutResolver,
    registry: &'a dyn PanelRegistry,
    config: &'a UrlConfig,
}

impl<'a> Encoder<'a> {
    pub fn new(
        layout: &'a dyn LayoutResolver,
        registry: &'a dyn PanelRegistry,
        config: &'a UrlConfig,
    ) -> Self {
        Self {
            layout,
            registry,
            config,
        }
    }

    /// Encode `target` for the panel identified by `panel`.
    pub fn encode(
        &self,
        context_prefix: &str,
        target: &PortletUrl,
        panel: Option<&PanelHandle>,
    ) -> Result<String, UrlError> {
        let result = panel
            .ok_or(UrlError::InvalidArgument("panel handle is required"))
            .and_then(|handle| self.build(context_prefix, target, handle));
        match &result {
            Ok(url) => {
                metrics::record_encode("ok");
                tracing::debug!(url = %url, "Encoded portal url");
            }
            Err(err) => {
                metrics::record_encode(err.kind());
                tracing::warn!(panel = ?panel, error = %err, "Failed to encode portal url");
            }
        }
        result
    }

    fn build(
        &self,
        context_prefix: &str,
        target: &PortletUrl,
        handle: &PanelHandle,
    ) -> Result<String, UrlError> {
        let content_instance_id = self
            .registry
            .content_instance_id_for(handle)
            .ok_or_else(|| UrlError::unresolved("content instance", handle.as_str()))?;
        let definition_id = self
            .registry
            .content_definition_id_for(&content_instance_id)
            .ok_or_else(|| UrlError::unresolved("content definition", &content_instance_id))?;
        let fname = self
            .registry
            .short_name_for(&definition_id)
            .ok_or_else(|| UrlError::unresolved("short name", &definition_id))?;

        let mut segments = Vec::with_capacity(4);
        if let Some(folder) = self.layout_segment(&content_instance_id)? {
            segments.push(folder);
        }
        if target.window_state != UrlState::Normal || !self.config.elide_normal_state {
            segments.push(grammar::state_token(target.window_state).to_string());
        }
        segments.push(PanelSegment::format(&fname, &content_instance_id));
        segments.push(grammar::marker_segment(target.is_action));

        let token = self
            .registry
            .token_for(handle)
            .ok_or_else(|| UrlError::unresolved("panel token", handle.as_str()))?;

        let mut url = grammar::join_path(context_prefix, &segments);
        let query = build_query(&token, target);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        Ok(url)
    }

    /// Folder segment for a content instance, or `None` when the instance is
    /// transient or lives directly in the root folder.
    fn layout_segment(&self, content_instance_id: &str) -> Result<Option<String>, UrlError> {
        let Some(folder_id) = self.layout.find_deepest_folder_containing(content_instance_id)
        else {
            return Ok(None);
        };
        if folder_id == self.config.root_folder_id {
            return Ok(None);
        }
        let node = self
            .layout
            .describe_node(&folder_id)
            .ok_or_else(|| UrlError::unresolved("layout node", &folder_id))?;
        if !node.is_folder || node.id == self.config.root_folder_id {
            return Ok(None);
        }
        Ok(Some(node.id))
    }
}

/// Control parameters first, then panel parameters, each in caller order.
fn build_query(token: &str, target: &PortletUrl) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair(&format!("{PORTAL_PARAM_PREFIX}{TARGET_PARAM}"), token);
    if target.portlet_mode != PortletMode::View {
        query.append_pair(
            &format!("{PORTAL_PARAM_PREFIX}{MODE_PARAM}"),
            target.portlet_mode.as_str(),
        );
    }
    for (key, value) in target.portal_parameters.pairs() {
        query.append_pair(&format!("{PORTAL_PARAM_PREFIX}{key}"), value);
    }
    for (key, value) in target.portlet_parameters.pairs() {
        query.append_pair(&format!("{PORTLET_PARAM_PREFIX}{key}"), value);
    }
    query.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MemoryLayout, MemoryPanelRegistry};

    struct Fixture {
        layout: MemoryLayout,
        registry: MemoryPanelRegistry,
        config: UrlConfig,
        handle: PanelHandle,
    }

    fn fixture(folder: Option<&str>, content_instance_id: &str) -> Fixture {
        let layout = MemoryLayout::new("root");
        layout.add_folder("home", "root");
        if let Some(folder) = folder {
            layout.place(content_instance_id, folder);
        }
        let registry = MemoryPanelRegistry::new();
        registry.register_definition("42", "weather");
        let handle = registry.register_panel("target", content_instance_id, "42");
        Fixture {
            layout,
            registry,
            config: UrlConfig::default(),
            handle,
        }
    }

    impl Fixture {
        fn encode(&self, prefix: &str, target: &PortletUrl) -> Result<String, UrlError> {
            Encoder::new(&self.layout, &self.registry, &self.config).encode(
                prefix,
                target,
                Some(&self.handle),
            )
        }
    }

    #[test]
    fn test_home_max_weather() {
        let fx = fixture(Some("home"), "31");
        let url = fx.encode("/uPortal/", &PortletUrl::render(UrlState::Maximized)).unwrap();
        assert_eq!(url, "/uPortal/home/max/weather.31/render.uP?pltc_target=target");
    }

    #[test]
    fn test_alternate_context_path() {
        let fx = fixture(Some("home"), "31");
        let url = fx.encode("/p/", &PortletUrl::render(UrlState::Maximized)).unwrap();
        assert_eq!(url, "/p/home/max/weather.31/render.uP?pltc_target=target");
    }

    #[test]
    fn test_home_normal_weather() {
        let fx = fixture(Some("home"), "31");
        let url = fx.encode("/uPortal/", &PortletUrl::render(UrlState::Normal)).unwrap();
        assert_eq!(url, "/uPortal/home/normal/weather.31/render.uP?pltc_target=target");
    }

    #[test]
    fn test_help_mode_parameter() {
        let fx = fixture(Some("home"), "31");
        let target = PortletUrl::render(UrlState::Normal).with_mode(PortletMode::Help);
        let url = fx.encode("/uPortal/", &target).unwrap();
        assert_eq!(
            url,
            "/uPortal/home/normal/weather.31/render.uP?pltc_target=target&pltc_mode=help"
        );
    }

    #[test]
    fn test_transient_panel_has_no_folder() {
        let fx = fixture(None, "ctf31");
        let url = fx.encode("/uPortal/", &PortletUrl::render(UrlState::Maximized)).unwrap();
        assert_eq!(url, "/uPortal/max/weather.ctf31/render.uP?pltc_target=target");
    }

    #[test]
    fn test_root_folder_is_elided() {
        let fx = fixture(Some("root"), "31");
        let url = fx.encode("/uPortal/", &PortletUrl::render(UrlState::Exclusive)).unwrap();
        assert_eq!(url, "/uPortal/exclusive/weather.31/render.uP?pltc_target=target");
    }

    #[test]
    fn test_weather_action_with_parameters() {
        let fx = fixture(Some("home"), "31");
        let target = PortletUrl::action(UrlState::Normal)
            .with_portlet_parameter("pp_action", "addCity")
            .with_portlet_parameter("pp_zip", "53706");
        let url = fx.encode("/uPortal/", &target).unwrap();
        assert_eq!(
            url,
            "/uPortal/home/normal/weather.31/action.uP?pltc_target=target&pltp_pp_action=addCity&pltp_pp_zip=53706"
        );
    }

    #[test]
    fn test_parameter_ordering_and_escaping() {
        let fx = fixture(Some("home"), "31");
        let target = PortletUrl::render(UrlState::Normal)
            .with_portlet_parameter("city", "Mad City&Co")
            .with_portal_parameter("page", "2")
            .with_portlet_parameter("zip", "1")
            .with_portlet_parameter("city", "Ann Arbor");
        let url = fx.encode("/uPortal/", &target).unwrap();
        assert_eq!(
            url,
            "/uPortal/home/normal/weather.31/render.uP?pltc_target=target&pltc_page=2\
             &pltp_city=Mad+City%26Co&pltp_city=Ann+Arbor&pltp_zip=1"
        );
    }

    #[test]
    fn test_elide_normal_state_option() {
        let mut fx = fixture(Some("home"), "31");
        fx.config.elide_normal_state = true;
        let url = fx.encode("/uPortal/", &PortletUrl::render(UrlState::Normal)).unwrap();
        assert_eq!(url, "/uPortal/home/weather.31/render.uP?pltc_target=target");
    }

    #[test]
    fn test_missing_handle_is_invalid_argument() {
        let fx = fixture(Some("home"), "31");
        let err = Encoder::new(&fx.layout, &fx.registry, &fx.config)
            .encode("/uPortal/", &PortletUrl::default(), None)
            .unwrap_err();
        assert_eq!(err, UrlError::InvalidArgument("panel handle is required"));
    }

    #[test]
    fn test_unknown_definition_is_resolution_failure() {
        let fx = fixture(Some("home"), "31");
        let orphan = fx.registry.register_panel("orphan", "99", "missing");
        let err = Encoder::new(&fx.layout, &fx.registry, &fx.config)
            .encode("/uPortal/", &PortletUrl::default(), Some(&orphan))
            .unwrap_err();
        assert!(matches!(err, UrlError::ResolutionFailure { what: "short name", .. }));
    }
}
