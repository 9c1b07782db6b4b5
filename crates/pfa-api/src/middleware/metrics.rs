//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Store gauges (saved comparisons, share links) are refreshed
//! on each `/metrics` scrape; see the handler in `lib.rs`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use prometheus::core::Collector;
use prometheus::{
    Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    // -- HTTP middleware metrics (push model) --
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    // -- Store gauges (pull model, updated on /metrics scrape) --
    saved_comparisons_total: Gauge,
    share_links_total: GaugeVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a metrics instance with a fresh Prometheus registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("pfa_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "pfa_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
            ]),
            &["method", "path"],
        )?;

        let http_errors_total = IntCounterVec::new(
            Opts::new("pfa_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )?;

        let saved_comparisons_total = Gauge::new(
            "pfa_saved_comparisons_total",
            "Saved comparisons held in memory",
        )?;

        let share_links_total = GaugeVec::new(
            Opts::new("pfa_share_links_total", "Live share links by password protection"),
            &["protected"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_errors_total.clone()))?;
        registry.register(Box::new(saved_comparisons_total.clone()))?;
        registry.register(Box::new(share_links_total.clone()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                saved_comparisons_total,
                share_links_total,
            }),
        })
    }

    /// Total request count across all labels.
    pub fn requests(&self) -> u64 {
        sum_counter(&self.inner.http_requests_total)
    }

    /// Total error count across all labels.
    pub fn errors(&self) -> u64 {
        sum_counter(&self.inner.http_errors_total)
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Set the store gauges.
    pub fn set_store_sizes(&self, saved_comparisons: usize, protected_shares: usize, open_shares: usize) {
        self.inner
            .saved_comparisons_total
            .set(saved_comparisons as f64);
        self.inner.share_links_total.reset();
        self.inner
            .share_links_total
            .with_label_values(&["true"])
            .set(protected_shares as f64);
        self.inner
            .share_links_total
            .with_label_values(&["false"])
            .set(open_shares as f64);
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

fn sum_counter(counter: &IntCounterVec) -> u64 {
    counter
        .collect()
        .iter()
        .flat_map(|mf| mf.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

fn is_uuid(segment: &str) -> bool {
    segment.len() == 36
        && segment.chars().enumerate().all(|(i, c)| {
            if i == 8 || i == 13 || i == 18 || i == 23 {
                c == '-'
            } else {
                c.is_ascii_hexdigit()
            }
        })
}

/// Collapse identifier segments so label cardinality stays bounded.
///
/// UUID segments become `{id}`, as does the free-form segment after
/// `/v1/jurisdictions/`.
fn normalize_path(path: &str) -> String {
    let mut previous = "";
    let mut out = Vec::new();
    for (i, segment) in path.split('/').enumerate() {
        let collapsed = is_uuid(segment) || (i == 3 && previous == "jurisdictions" && !segment.is_empty());
        out.push(if collapsed { "{id}" } else { segment });
        previous = segment;
    }
    out.join("/")
}

/// Middleware that records HTTP request metrics via Prometheus.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        m.record_request(&method, &path, response.status().as_u16(), duration);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_at_zero() {
        let m = ApiMetrics::new().unwrap();
        assert_eq!(m.requests(), 0);
        assert_eq!(m.errors(), 0);
    }

    #[test]
    fn requests_and_errors_count_independently() {
        let m = ApiMetrics::new().unwrap();
        for _ in 0..5 {
            m.record_request("GET", "/v1/jurisdictions", 200, 0.01);
        }
        m.record_request("GET", "/v1/shares/{id}", 404, 0.002);
        m.record_request("POST", "/v1/comparisons", 422, 0.003);
        assert_eq!(m.requests(), 7);
        assert_eq!(m.errors(), 2);
    }

    #[test]
    fn instances_have_separate_registries() {
        let a = ApiMetrics::new().unwrap();
        let b = ApiMetrics::new().unwrap();
        a.record_request("GET", "/", 200, 0.0);
        assert_eq!(b.requests(), 0);
    }

    #[test]
    fn encodes_text_exposition() {
        let m = ApiMetrics::new().unwrap();
        m.record_request("GET", "/v1/jurisdictions", 200, 0.01);
        m.set_store_sizes(3, 1, 2);
        let text = m.gather_and_encode().unwrap();
        assert!(text.contains("pfa_http_requests_total"));
        assert!(text.contains("pfa_saved_comparisons_total 3"));
        assert!(text.contains("pfa_share_links_total{protected=\"true\"} 1"));
    }

    #[test]
    fn normalize_uuid_segments() {
        assert_eq!(
            normalize_path("/v1/shares/550e8400-e29b-41d4-a716-446655440000"),
            "/v1/shares/{id}"
        );
        assert_eq!(
            normalize_path("/v1/comparisons/saved/550e8400-e29b-41d4-a716-446655440000"),
            "/v1/comparisons/saved/{id}"
        );
    }

    #[test]
    fn normalize_jurisdiction_segments() {
        assert_eq!(normalize_path("/v1/jurisdictions/atlantis"), "/v1/jurisdictions/{id}");
        assert_eq!(
            normalize_path("/v1/jurisdictions/bvi/score"),
            "/v1/jurisdictions/{id}/score"
        );
        assert_eq!(normalize_path("/v1/jurisdictions"), "/v1/jurisdictions");
    }

    #[test]
    fn normalize_leaves_static_paths() {
        assert_eq!(normalize_path("/v1/comparisons"), "/v1/comparisons");
        assert_eq!(normalize_path("/health/liveness"), "/health/liveness");
    }
}
