//! Metrics collector for the dispatch coordinator
//!
//! Counters and histograms are registered through the `metrics` facade, so they
//! are no-ops until a recorder (e.g. the Prometheus exporter) is installed.

use anyhow::{Context, Result};
use metrics::{counter, histogram, Counter, Histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

/// Metrics collector for dispatch pipelines
pub struct MetricsCollector {
    dispatch_requests_total: Counter,
    dispatch_success_total: Counter,
    dispatch_pipeline_duration: Histogram,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            dispatch_requests_total: counter!("dispatch_requests_total"),
            dispatch_success_total: counter!("dispatch_success_total"),
            dispatch_pipeline_duration: histogram!("dispatch_pipeline_duration_seconds"),
        }
    }

    /// Record a pipeline that created a case
    pub fn record_dispatch_success(&self, ambulance_id: i64, duration_seconds: f64) {
        self.dispatch_requests_total.increment(1);
        self.dispatch_success_total.increment(1);
        self.dispatch_pipeline_duration.record(duration_seconds);

        info!(
            ambulance_id = ambulance_id,
            duration_seconds = duration_seconds,
            "Dispatch pipeline completed"
        );
    }

    /// Record a pipeline that ended in a failure outcome
    pub fn record_dispatch_failure(&self, reason_kind: &'static str, duration_seconds: f64) {
        self.dispatch_requests_total.increment(1);
        counter!("dispatch_failures_total", "reason_kind" => reason_kind).increment(1);
        self.dispatch_pipeline_duration.record(duration_seconds);
    }

    /// Record a compensating release of a reserved ambulance
    pub fn record_compensation(&self, ambulance_id: i64, released: bool) {
        let outcome = if released { "released" } else { "stranded" };
        counter!("dispatch_compensations_total", "outcome" => outcome).increment(1);

        if !released {
            warn!(
                ambulance_id = ambulance_id,
                "Compensating release failed, ambulance stays reserved"
            );
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global Prometheus recorder and return a handle for rendering
pub fn install_prometheus_recorder() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("安装Prometheus指标记录器失败")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_outcomes_are_rendered() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            let metrics = MetricsCollector::new();
            metrics.record_dispatch_success(11, 0.25);
            metrics.record_dispatch_failure("no_match", 0.1);
            metrics.record_compensation(11, true);
            metrics.record_compensation(12, false);
        });

        let rendered = handle.render();
        assert!(rendered.contains("dispatch_requests_total 2"));
        assert!(rendered.contains("dispatch_success_total 1"));
        assert!(rendered.contains(r#"dispatch_failures_total{reason_kind="no_match"} 1"#));
        assert!(rendered.contains(r#"dispatch_compensations_total{outcome="released"} 1"#));
        assert!(rendered.contains(r#"dispatch_compensations_total{outcome="stranded"} 1"#));
        assert!(rendered.contains("dispatch_pipeline_duration_seconds"));
    }
}
