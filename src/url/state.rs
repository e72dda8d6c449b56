//! Navigation state model.
//!
//! # Responsibilities
//! - Describe what a portal page should render for one request
//! - Describe the target of an outbound panel link
//!
//! # Design Decisions
//! - `NavigationState` is immutable once built; consumers share it via `Arc`
//! - `UrlState` is a closed enum; `Normal` is the default when the path omits it

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::url::grammar::ParameterMap;

/// How much of the page the targeted panel replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlState {
    #[default]
    Normal,
    Maximized,
    Exclusive,
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::url::grammar::state_token(*self))
    }
}

/// Mode a panel is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortletMode {
    #[default]
    View,
    Edit,
    Help,
}

impl PortletMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortletMode::View => "view",
            PortletMode::Edit => "edit",
            PortletMode::Help => "help",
        }
    }

    /// Parse a mode name, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "view" => Some(PortletMode::View),
            "edit" => Some(PortletMode::Edit),
            "help" => Some(PortletMode::Help),
            _ => None,
        }
    }
}

impl fmt::Display for PortletMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved handle of a panel (portlet window).
///
/// Opaque to the codec: only the panel registry knows how to turn it back
/// into a URL token or a content instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelHandle(String);

impl PanelHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded description of an inbound portal request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    pub url_state: UrlState,
    pub is_action: bool,
    /// Deepest layout node named in the path.
    pub targeted_layout_node_id: Option<String>,
    /// Content-instance id taken verbatim from the panel segment.
    pub targeted_channel_subscribe_id: Option<String>,
    pub targeted_panel_handle: Option<PanelHandle>,
}

/// Target of an outbound panel link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortletUrl {
    pub window_state: UrlState,
    pub portlet_mode: PortletMode,
    pub is_action: bool,
    /// Extra portal-level control parameters, emitted with the `pltc_` prefix.
    pub portal_parameters: ParameterMap,
    /// Application parameters passed through to the panel with the `pltp_` prefix.
    pub portlet_parameters: ParameterMap,
}

impl PortletUrl {
    pub fn render(window_state: UrlState) -> Self {
        Self {
            window_state,
            ..Self::default()
        }
    }

    pub fn action(window_state: UrlState) -> Self {
        Self {
            window_state,
            is_action: true,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: PortletMode) -> Self {
        self.portlet_mode = mode;
        self
    }

    pub fn with_portlet_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.portlet_parameters.append(key, value);
        self
    }

    pub fn with_portal_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.portal_parameters.append(key, value);
        self
    }
}
