//! Portal URL codec library.
//!
//! Decodes human-readable portal paths such as
//! `/uPortal/home/max/weather.31/render.uP` into a [`NavigationState`] and
//! encodes panel targets back into the same canonical form.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod url;

pub use config::schema::PortalConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::{LayoutNode, LayoutResolver, PanelRegistry};
pub use url::{
    NavigationState, PanelHandle, PortalUrlProvider, PortletMode, PortletUrl, UrlError, UrlState,
};
