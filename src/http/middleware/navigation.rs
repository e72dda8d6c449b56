//! Navigation decoding middleware.
//! Decodes the portal path once and caches the result on the request.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::observability::metrics;
use crate::url::PortalUrlProvider;

pub async fn navigation_middleware(
    State(provider): State<PortalUrlProvider>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();

    let response = match provider.request_info(&mut req) {
        Ok(navigation) => {
            tracing::debug!(
                path = %req.uri().path(),
                url_state = %navigation.url_state,
                is_action = navigation.is_action,
                "Navigation state attached"
            );
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(path = %req.uri().path(), error = %e, "Rejected portal request");
            e.into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
