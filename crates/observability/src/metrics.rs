//! Prometheus metrics
//!
//! # Metrics
//!
//! * `mep_http_requests_total{endpoint,status}` - Requests answered
//! * `mep_http_request_duration_seconds{endpoint}` - Time to answer
//! * `mep_http_requests_in_flight{endpoint}` - Requests being processed

use metrics::{counter, gauge, histogram, Gauge, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Start the Prometheus exporter; metrics are served at `/metrics`
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new().with_http_listener(addr).install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Request metrics for one HTTP endpoint.
///
/// Without an installed exporter every call is a no-op.
#[derive(Clone)]
pub struct ServerMetrics {
    endpoint: String,
    request_duration: Histogram,
    in_flight: Gauge,
}

impl ServerMetrics {
    pub fn new(endpoint: &str) -> Self {
        let endpoint = endpoint.to_string();

        Self {
            request_duration: histogram!("mep_http_request_duration_seconds", "endpoint" => endpoint.clone()),
            in_flight: gauge!("mep_http_requests_in_flight", "endpoint" => endpoint.clone()),
            endpoint,
        }
    }

    /// Record a completed request
    pub fn record_request(&self, duration: Duration, status_code: u16) {
        counter!(
            "mep_http_requests_total",
            "endpoint" => self.endpoint.clone(),
            "status" => status_code.to_string()
        )
        .increment(1);
        self.request_duration.record(duration.as_secs_f64());
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Tracks one request: in-flight while alive, recorded on drop.
///
/// Status defaults to 200.
pub struct RequestMetricsGuard<'a> {
    metrics: &'a ServerMetrics,
    start: Instant,
    status_code: u16,
}

impl<'a> RequestMetricsGuard<'a> {
    pub fn new(metrics: &'a ServerMetrics) -> Self {
        metrics.in_flight.increment(1.0);
        Self {
            metrics,
            start: Instant::now(),
            status_code: 200,
        }
    }

    pub fn set_status(&mut self, code: u16) {
        self.status_code = code;
    }

    pub fn status(&self) -> u16 {
        self.status_code
    }
}

impl Drop for RequestMetricsGuard<'_> {
    fn drop(&mut self) {
        self.metrics.in_flight.decrement(1.0);
        self.metrics
            .record_request(self.start.elapsed(), self.status_code);
    }
}
