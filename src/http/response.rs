//! Response bodies of the portal endpoints.

use serde::Serialize;

use crate::url::{NavigationState, RequestParameters};

/// Body returned for every successfully decoded portal path.
#[derive(Debug, Clone, Serialize)]
pub struct PortalResponse {
    /// Value of the `x-request-id` header, if set.
    pub request_id: Option<String>,
    pub navigation: NavigationState,
    pub parameters: RequestParameters,
    /// Canonical URL of the targeted panel; absent when no panel resolved.
    pub canonical_url: Option<String>,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub context_path: String,
}
