//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mount_requests_total` (counter): requests reaching a mount point,
//!   labelled by `prefix` and `matched`

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with an HTTP scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count one request reaching the mount at `prefix`.
pub fn record_mount(prefix: &str, matched: bool) {
    ::metrics::counter!(
        "mount_requests_total",
        "prefix" => prefix.to_string(),
        "matched" => if matched { "true" } else { "false" }
    )
    .increment(1);
}
