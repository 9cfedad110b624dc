//! Metrics collection and exposition.
//!
//! # Metrics
//! - `board_upstream_requests_total` (counter): upstream calls by endpoint, outcome
//! - `board_upstream_duration_seconds` (histogram): upstream latency by endpoint
//! - `board_live_lookups_total` (counter): roster lookups by outcome
//!
//! # Design Decisions
//! - Recording without an installed recorder is a no-op, so library code and tests
//!   never need to care whether the exporter is running

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_upstream(endpoint: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "board_upstream_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("board_upstream_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_live_lookup(outcome: &'static str) {
    metrics::counter!("board_live_lookups_total", "outcome" => outcome).increment(1);
}
