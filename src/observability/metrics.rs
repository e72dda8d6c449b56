//! Metrics collection and exposition.
//!
//! # Metrics
//! - `portal_url_decode_total` (counter): decoded paths by outcome
//! - `portal_url_encode_total` (counter): generated urls by outcome
//! - `portal_url_unresolved_panel_total` (counter): panel tokens the registry did not know
//! - `portal_url_decode_cache_hits_total` (counter): decodes answered from the request cache
//! - `portal_url_requests_total` (counter): HTTP requests by method and status
//! - `portal_url_request_duration_seconds` (histogram): HTTP latency
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so the library can
//!   be used without the exporter

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

pub fn record_decode(outcome: &'static str) {
    counter!("portal_url_decode_total", "outcome" => outcome).increment(1);
}

pub fn record_encode(outcome: &'static str) {
    counter!("portal_url_encode_total", "outcome" => outcome).increment(1);
}

pub fn record_unresolved_panel() {
    counter!("portal_url_unresolved_panel_total").increment(1);
}

pub fn record_cache_hit() {
    counter!("portal_url_decode_cache_hits_total").increment(1);
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    counter!("portal_url_requests_total", &labels).increment(1);
    histogram!("portal_url_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
