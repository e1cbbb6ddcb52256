//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by decision, method, status
//! - `edge_request_duration_seconds` (histogram): latency by decision
//! - `edge_upstream_errors_total` (counter): forwarding failures by target
//! - `edge_config_reloads_total` (counter): applied hot reloads

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(decision: &'static str, method: &str, status: u16, start: Instant) {
    counter!(
        "edge_requests_total",
        "decision" => decision,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("edge_request_duration_seconds", "decision" => decision)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_error(target: &'static str) {
    counter!("edge_upstream_errors_total", "target" => target).increment(1);
}

pub fn record_config_reload() {
    counter!("edge_config_reloads_total").increment(1);
}
