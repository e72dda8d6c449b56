//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the portal and health handlers
//! - Wire up middleware (tracing, timeout, request ID, navigation decoding)
//! - Bind server to listener
//! - Answer every portal path with its decoded navigation state and the
//!   canonical URL of the targeted panel

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    routing::{any, get},
    Json, Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::PortalConfig;
use crate::http::middleware::navigation_middleware;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{HealthResponse, PortalResponse};
use crate::lifecycle::wait_for_shutdown;
use crate::url::{decode_parameters, PortalUrlProvider, PortletUrl, UrlError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: PortalUrlProvider,
}

/// HTTP server for the portal URL service.
pub struct HttpServer {
    router: Router,
    config: PortalConfig,
}

impl HttpServer {
    /// Create a server backed by the in-memory collaborators in `config`.
    pub fn new(config: PortalConfig) -> Self {
        let provider = PortalUrlProvider::from_config(&config);
        Self::with_provider(config, provider)
    }

    /// Create a server around an existing provider.
    pub fn with_provider(config: PortalConfig, provider: PortalUrlProvider) -> Self {
        let router = Self::build_router(&config, AppState { provider });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &PortalConfig, state: AppState) -> Router {
        let portal = Router::new()
            .route("/{*path}", any(portal_handler))
            .route("/", any(portal_handler))
            .route_layer(middleware::from_fn_with_state(
                state.provider.clone(),
                navigation_middleware,
            ));

        Router::new()
            .route("/health", get(health_handler))
            .merge(portal)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, e.g. for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Serve on `listener` until Ctrl+C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            context_path = %self.config.url.context_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Portal handler.
/// Reads the navigation state cached by the middleware and links back to
/// the targeted panel in the same state.
async fn portal_handler(
    State(state): State<AppState>,
    mut request: Request<Body>,
) -> Result<Json<PortalResponse>, UrlError> {
    let navigation = state.provider.request_info(&mut request)?;
    let parameters = decode_parameters(request.uri().query().unwrap_or_default());

    let canonical_url = match &navigation.targeted_panel_handle {
        Some(handle) => {
            let target = PortletUrl {
                window_state: navigation.url_state,
                portlet_mode: parameters.portlet_mode,
                is_action: navigation.is_action,
                portal_parameters: parameters.portal_parameters.clone(),
                portlet_parameters: parameters.portlet_parameters.clone(),
            };
            Some(state.provider.portlet_url(&target, Some(handle))?)
        }
        None => None,
    };

    Ok(Json(PortalResponse {
        request_id: request_id(&request),
        navigation: navigation.as_ref().clone(),
        parameters,
        canonical_url,
    }))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        context_path: state.provider.config().context_path.clone(),
    })
}
