//! Metrics collection and exposition.
//!
//! # Metrics
//! - `parts_requests_total` (counter): inbound requests by status
//! - `parts_request_duration_seconds` (histogram): inbound latency
//! - `upstream_requests_total` (counter): upstream calls by outcome
//! - `upstream_request_duration_seconds` (histogram): upstream latency

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one inbound request on the parts endpoint.
pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("parts_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("parts_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one upstream call and how it ended.
pub fn record_upstream(outcome: &'static str, start: Instant) {
    metrics::counter!("upstream_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("upstream_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
