//! Metrics collection and exposition.
//!
//! # Metrics
//! - `inventory_requests_total` (counter): requests by route, status
//! - `inventory_request_duration_seconds` (histogram): latency of
//!   availability checks
//! - `inventory_availability_checks_total` (counter): checks by outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exposition only when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::inventory::Availability;

/// Install the Prometheus recorder and its scrape endpoint.
/// Must run inside the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count a handled request without timing it.
pub fn count_request(route: &'static str, status: u16) {
    metrics::counter!(
        "inventory_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Count a handled request and record its latency since `start`.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    count_request(route, status);
    metrics::histogram!("inventory_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of an availability check.
pub fn record_availability(outcome: Availability) {
    metrics::counter!(
        "inventory_availability_checks_total",
        "outcome" => outcome.as_str()
    )
    .increment(1);
}
