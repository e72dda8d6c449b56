//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PortalConfig (validated, immutable)
//!     → UrlConfig shared with the codec, fixtures fed to the in-memory registries
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::PortalConfig;
pub use schema::{DefinitionConfig, FolderConfig, ListenerConfig, PanelConfig};
pub use schema::{ObservabilityConfig, TimeoutConfig, UrlConfig};
