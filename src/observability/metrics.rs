//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_redirect_decisions_total` (counter): decisions by outcome and reason
//! - `locale_redirect_decision_duration_seconds` (histogram): time spent deciding
//! - `locale_redirect_upstream_errors_total` (counter): failed upstream forwards
//! - `locale_redirect_config_reloads_total` (counter): reloads by result
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Labels are low-cardinality enums, never paths or languages

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::redirect::Decision;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_decision(decision: &Decision, start: Instant) {
    let reason = match decision {
        Decision::Skip { reason } => reason.as_str(),
        _ => "none",
    };
    metrics::counter!(
        "locale_redirect_decisions_total",
        "outcome" => decision.outcome(),
        "reason" => reason
    )
    .increment(1);
    metrics::histogram!("locale_redirect_decision_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_error() {
    metrics::counter!("locale_redirect_upstream_errors_total").increment(1);
}

pub fn record_config_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    metrics::counter!("locale_redirect_config_reloads_total", "result" => result).increment(1);
}
