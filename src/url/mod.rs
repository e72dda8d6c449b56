//! Portal URL codec.
//!
//! # Data Flow
//! ```text
//! Inbound request path
//!     → cache.rs (already decoded for this request?)
//!     → decoder.rs (reverse scan: marker → panel → state → layout)
//!     → NavigationState (immutable, Arc-shared)
//!
//! Outbound link (PortletUrl + PanelHandle)
//!     → encoder.rs (registry + layout lookups, fixed order)
//!     → "/uPortal/home/max/weather.31/render.uP?pltc_target=target"
//! ```
//!
//! # Design Decisions
//! - grammar.rs is shared by both directions so parsed and produced forms agree
//! - Decode tolerates registry misses; encode does not

pub mod cache;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod grammar;
pub mod provider;
pub mod state;

pub use decoder::{decode, decode_parameters, RequestParameters};
pub use encoder::Encoder;
pub use error::UrlError;
pub use grammar::ParameterMap;
pub use provider::PortalUrlProvider;
pub use state::{NavigationState, PanelHandle, PortletMode, PortletUrl, UrlState};
