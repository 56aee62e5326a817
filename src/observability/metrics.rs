//! Metrics collection and exposition.
//!
//! # Metrics
//! - `fetch_proxy_requests_total` (counter): requests by response status
//! - `fetch_proxy_request_duration_seconds` (histogram): handler latency, retries included
//! - `fetch_proxy_upstream_retries_total` (counter): backoff sleeps taken
//! - `fetch_proxy_truncated_total` (counter): bodies cut to the size cap
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(status: u16, start_time: Instant) {
    counter!("fetch_proxy_requests_total", "status" => status.to_string()).increment(1);
    histogram!("fetch_proxy_request_duration_seconds").record(start_time.elapsed().as_secs_f64());
}

pub fn record_retry() {
    counter!("fetch_proxy_upstream_retries_total").increment(1);
}

pub fn record_truncated() {
    counter!("fetch_proxy_truncated_total").increment(1);
}
