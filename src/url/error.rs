//! Error taxonomy for the URL codec.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised while decoding or encoding portal URLs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// Inbound path does not follow the portal path grammar.
    #[error("malformed portal request '{path}': {reason}")]
    MalformedRequest { path: String, reason: &'static str },

    /// Encoder called without a required argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Panel token in an inbound path is unknown to the panel registry.
    /// Decoding tolerates this and leaves the panel handle absent.
    #[error("panel token '{token}' does not resolve")]
    UnresolvedPanelToken { token: String },

    /// A collaborator lookup the encoder depends on produced nothing.
    #[error("could not resolve {what} for '{key}'")]
    ResolutionFailure { what: &'static str, key: String },
}

impl UrlError {
    pub(crate) fn malformed(path: &str, reason: &'static str) -> Self {
        UrlError::MalformedRequest {
            path: path.to_string(),
            reason,
        }
    }

    pub(crate) fn unresolved(what: &'static str, key: impl Into<String>) -> Self {
        UrlError::ResolutionFailure {
            what,
            key: key.into(),
        }
    }

    /// Label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UrlError::MalformedRequest { .. } => "malformed_request",
            UrlError::InvalidArgument(_) => "invalid_argument",
            UrlError::UnresolvedPanelToken { .. } => "unresolved_panel_token",
            UrlError::ResolutionFailure { .. } => "resolution_failure",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            UrlError::MalformedRequest { .. } => StatusCode::BAD_REQUEST,
            UrlError::UnresolvedPanelToken { .. } => StatusCode::NOT_FOUND,
            UrlError::InvalidArgument(_) | UrlError::ResolutionFailure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for UrlError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
