//! HTTP-level tests driving the router without a socket.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use portal_url::config::loader::parse_config;
use portal_url::config::PortalConfig;
use portal_url::http::X_REQUEST_ID;
use portal_url::{HttpServer, PortalUrlProvider};

mod common;

use common::{CountingLayout, CountingRegistry};

const FIXTURE: &str = r#"
[url]
context_path = "/uPortal/"

[[folders]]
id = "home"
channels = ["31"]

[[folders]]
id = "subtab1"
parent = "home"

[[folders]]
id = "subtab2"
parent = "subtab1"
channels = ["32"]

[[definitions]]
id = "42"
fname = "weather"

[[definitions]]
id = "43"
fname = "news"

[[panels]]
token = "target"
content_instance_id = "31"
definition_id = "42"

[[panels]]
token = "headlines"
content_instance_id = "32"
definition_id = "43"
"#;

fn server() -> HttpServer {
    HttpServer::new(parse_config(FIXTURE).unwrap())
}

async fn get(server: &HttpServer, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = server
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let request_id = response
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, request_id, body.to_vec())
}

#[tokio::test]
async fn test_decodes_panel_path() {
    let server = server();
    let (status, request_id, body) = get(&server, "/uPortal/home/max/weather.31/render.uP").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["navigation"]["url_state"], "maximized");
    assert_eq!(json["navigation"]["is_action"], false);
    assert_eq!(json["navigation"]["targeted_layout_node_id"], "home");
    assert_eq!(json["navigation"]["targeted_channel_subscribe_id"], "31");
    assert_eq!(json["navigation"]["targeted_panel_handle"], "target");
    assert_eq!(
        json["canonical_url"],
        "/uPortal/home/max/weather.31/render.uP?pltc_target=target"
    );

    // Generated request id is echoed both in the header and the body.
    let request_id = request_id.expect("x-request-id header");
    assert_eq!(json["request_id"], request_id.as_str());
}

#[tokio::test]
async fn test_canonical_url_uses_deepest_folder_only() {
    let server = server();
    let (status, _, body) =
        get(&server, "/uPortal/home/subtab1/subtab2/exclusive/news.32/action.uP").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["navigation"]["targeted_layout_node_id"], "subtab2");
    assert_eq!(json["navigation"]["is_action"], true);
    assert_eq!(
        json["canonical_url"],
        "/uPortal/subtab2/exclusive/news.32/action.uP?pltc_target=headlines"
    );
}

#[tokio::test]
async fn test_query_parameters_are_carried_over() {
    let server = server();
    let (status, _, body) = get(
        &server,
        "/uPortal/home/normal/weather.31/action.uP?pltc_target=target&pltc_mode=help&pltp_pp_action=addCity&pltp_pp_zip=53706&utm=x",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["parameters"]["target"], "target");
    assert_eq!(json["parameters"]["portlet_mode"], "help");
    assert_eq!(
        json["canonical_url"],
        "/uPortal/home/normal/weather.31/action.uP?pltc_target=target&pltc_mode=help&pltp_pp_action=addCity&pltp_pp_zip=53706"
    );
}

#[tokio::test]
async fn test_navigation_without_panel() {
    let server = server();
    let (status, _, body) = get(&server, "/uPortal/home/normal/render.uP").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["navigation"]["targeted_layout_node_id"], "home");
    assert!(json["navigation"]["targeted_channel_subscribe_id"].is_null());
    assert!(json["canonical_url"].is_null());
}

#[tokio::test]
async fn test_unknown_panel_degrades() {
    let server = server();
    let (status, _, body) = get(&server, "/uPortal/home/normal/calendar.99/render.uP").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["navigation"]["targeted_channel_subscribe_id"], "99");
    assert!(json["navigation"]["targeted_panel_handle"].is_null());
    assert!(json["canonical_url"].is_null());
}

#[tokio::test]
async fn test_malformed_path_is_bad_request() {
    let server = server();
    let (status, _, _) = get(&server, "/no/way/is/this/a/valid/url").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = get(&server, "/uPortal/home/normal/weather.31/view.uP").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = get(&server, "/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let server = server();
    let (status, _, body) = get(&server, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["context_path"], "/uPortal/");
}

#[tokio::test]
async fn test_middleware_and_handler_share_one_decode() {
    let layout = Arc::new(CountingLayout::default().with_folder("31", "home"));
    let registry = Arc::new(CountingRegistry::weather());
    let config = PortalConfig::default();
    let provider = PortalUrlProvider::new(layout, registry.clone(), config.url.clone());
    let server = HttpServer::with_provider(config, provider);

    let (status, _, body) = get(&server, "/uPortal/home/normal/weather.31/render.uP").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(registry.resolve_calls(), 1);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["navigation"]["targeted_panel_handle"], "window-target");
    assert_eq!(
        json["canonical_url"],
        "/uPortal/home/normal/weather.31/render.uP?pltc_target=target"
    );
}
