//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use super::config::MetricsConfig;

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}(\.[A-Za-z0-9]+)?")
        .expect("valid uuid pattern")
});

static NUMERIC_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d+(/|$)").expect("valid numeric pattern"));

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig, version: &str) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    let path = normalize_metrics_path(&config.path);

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("devops_blue_info", "version" => version.to_string()).set(1.0);
            tracing::info!("Prometheus metrics initialized at {}", path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
                path,
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Route paths must start with `/`; an empty path falls back to `/metrics`
fn normalize_metrics_path(path: &str) -> String {
    let path = path.trim();

    if path.is_empty() {
        "/metrics".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path.clone();

    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record one outbound call to a peer service
pub fn record_peer_request(peer: &str, operation: &str, success: bool, duration: Duration) {
    let labels = [
        ("peer", peer.to_string()),
        ("operation", operation.to_string()),
        ("outcome", if success { "success" } else { "error" }.to_string()),
    ];

    counter!("peer_requests_total", &labels).increment(1);
    histogram!("peer_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Record a started fake load task ("cpu" or "memory")
pub fn record_fake_load(kind: &'static str, tasks: u64) {
    counter!("fake_load_tasks_total", "kind" => kind).increment(tasks);
}

/// Replace stored file names and numeric segments to keep label cardinality low
fn sanitize_path(path: &str) -> String {
    let path = UUID_SEGMENT.replace_all(path, "{id}");
    let path = NUMERIC_SEGMENT.replace_all(&path, "/{id}$1");

    if path.len() > 50 {
        path[..50].to_string()
    } else {
        path.to_string()
    }
}
