//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rpc_server_requests_total` (counter): inbound calls by method, status
//! - `rpc_server_request_duration_seconds` (histogram): inbound latency
//! - `rpc_client_calls_total` (counter): outbound calls by method, outcome
//! - `rpc_client_call_duration_seconds` (histogram): outbound latency
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops without an exporter
//! - Unmatched routes are labelled `none` to bound cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound RPC request.
pub fn record_server_request(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();
    counter!("rpc_server_requests_total", "method" => method.clone(), "status" => status.clone()).increment(1);
    histogram!("rpc_server_request_duration_seconds", "method" => method, "status" => status)
        .record(start.elapsed().as_secs_f64());
}

/// Record one outbound RPC call.
pub fn record_client_call(method: &str, outcome: &'static str, start: Instant) {
    let method = method.to_string();
    counter!("rpc_client_calls_total", "method" => method.clone(), "outcome" => outcome).increment(1);
    histogram!("rpc_client_call_duration_seconds", "method" => method, "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
