//! Inbound path decoding.
//!
//! # Responsibilities
//! - Strip the context prefix and split the path into segments
//! - Reverse-scan the segments into a `NavigationState`
//! - Split an inbound query string into portal and panel parameters
//!
//! # Design Decisions
//! - Explicit state machine over the reversed segment list; each stage
//!   consumes zero or one segment
//! - Grammar violations fail; registry misses degrade to absent fields

use url::form_urlencoded;

use crate::observability::metrics;
use crate::registry::PanelRegistry;
use crate::url::error::UrlError;
use crate::url::grammar::{
    self, PanelSegment, ParameterMap, MODE_PARAM, PORTAL_PARAM_PREFIX, PORTLET_PARAM_PREFIX,
    TARGET_PARAM,
};
use crate::url::state::{NavigationState, PanelHandle, PortletMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    ExpectMarker,
    ExpectPanel,
    ExpectState,
    CollectLayout,
}

/// Decode an inbound request path into the navigation state it describes.
pub fn decode(
    registry: &dyn PanelRegistry,
    context_prefix: &str,
    full_path: &str,
) -> Result<NavigationState, UrlError> {
    let path = strip_context(context_prefix, full_path)?;
    let segments = grammar::split_segments(path)
        .into_iter()
        .map(grammar::unescape_segment)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| UrlError::malformed(full_path, "segment is not valid UTF-8"))?;
    if segments.is_empty() {
        return Err(UrlError::malformed(full_path, "path has no segments"));
    }

    let mut state = NavigationState::default();
    let mut stage = Stage::ExpectMarker;
    let mut remaining = segments.iter().map(String::as_str).rev().peekable();

    while let Some(segment) = remaining.peek().copied() {
        match stage {
            Stage::ExpectMarker => {
                state.is_action = grammar::parse_marker(segment).ok_or_else(|| {
                    UrlError::malformed(full_path, "final segment is not action or render")
                })?;
                remaining.next();
                stage = Stage::ExpectPanel;
            }
            Stage::ExpectPanel => {
                if let Some(panel) = PanelSegment::parse(segment) {
                    state.targeted_channel_subscribe_id = Some(panel.content_id.to_string());
                    state.targeted_panel_handle = resolve_panel(registry, panel.token)
                        .map_err(|err| {
                            metrics::record_unresolved_panel();
                            tracing::warn!(
                                path = %full_path,
                                error = %err,
                                "Panel token did not resolve"
                            );
                        })
                        .ok();
                    remaining.next();
                }
                stage = Stage::ExpectState;
            }
            Stage::ExpectState => {
                if let Some(url_state) = grammar::parse_state(segment) {
                    state.url_state = url_state;
                    remaining.next();
                }
                stage = Stage::CollectLayout;
            }
            Stage::CollectLayout => {
                // First layout segment seen from the end is the deepest one.
                if state.targeted_layout_node_id.is_none() {
                    state.targeted_layout_node_id = Some(segment.to_string());
                }
                remaining.next();
            }
        }
    }

    tracing::debug!(
        path = %full_path,
        url_state = %state.url_state,
        is_action = state.is_action,
        layout_node = ?state.targeted_layout_node_id,
        subscribe_id = ?state.targeted_channel_subscribe_id,
        "Decoded portal path"
    );
    Ok(state)
}

fn strip_context<'a>(context_prefix: &str, full_path: &'a str) -> Result<&'a str, UrlError> {
    let prefix = context_prefix.trim_end_matches('/');
    let rest = full_path
        .strip_prefix(prefix)
        .ok_or_else(|| UrlError::malformed(full_path, "path is outside the context prefix"))?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return Err(UrlError::malformed(full_path, "path is outside the context prefix"));
    }
    Ok(rest)
}

fn resolve_panel(registry: &dyn PanelRegistry, token: &str) -> Result<PanelHandle, UrlError> {
    registry
        .resolve_token(token)
        .ok_or_else(|| UrlError::UnresolvedPanelToken {
            token: token.to_string(),
        })
}

/// Parameters carried by an inbound query string.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct RequestParameters {
    /// Panel token named by `pltc_target`.
    pub target: Option<String>,
    /// Mode named by `pltc_mode`; view when absent or unknown.
    pub portlet_mode: PortletMode,
    /// Other `pltc_` parameters, prefix stripped.
    pub portal_parameters: ParameterMap,
    /// `pltp_` parameters, prefix stripped.
    pub portlet_parameters: ParameterMap,
}

/// Split an inbound query string into control and panel parameters.
/// Parameters without a reserved prefix are ignored.
pub fn decode_parameters(query: &str) -> RequestParameters {
    let mut params = RequestParameters::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if let Some(name) = key.strip_prefix(PORTAL_PARAM_PREFIX) {
            match name {
                TARGET_PARAM => {
                    params.target.get_or_insert_with(|| value.into_owned());
                }
                MODE_PARAM => {
                    params.portlet_mode = PortletMode::parse(&value).unwrap_or_default()
                }
                _ => params.portal_parameters.append(name, value.into_owned()),
            }
        } else if let Some(name) = key.strip_prefix(PORTLET_PARAM_PREFIX) {
            params.portlet_parameters.append(name, value.into_owned());
        }
    }
    params
}
