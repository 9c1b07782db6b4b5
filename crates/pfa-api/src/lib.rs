//! # pfa-api — Axum API Service for the Private Fund Architect
//!
//! HTTP facade over the `pfa-scoring` engine. The engine is pure; this
//! crate adds request validation, persistence for saved comparisons and
//! share links, metrics, and the OpenAPI document.
//!
//! ## API Surface
//!
//! | Prefix                      | Module                        | Domain                  |
//! |-----------------------------|-------------------------------|-------------------------|
//! | `/v1/jurisdictions/*`       | [`routes::jurisdictions`]     | Reference data, scoring |
//! | `/v1/comparisons`           | [`routes::comparisons`]       | Ranked comparisons      |
//! | `/v1/comparisons/saved/*`   | [`routes::saved`]             | Saved comparisons       |
//! | `/v1/recommendations`       | [`routes::recommendations`]   | Architect ranking       |
//! | `/v1/shares/*`              | [`routes::shares`]            | Share links             |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → BodyLimit → Handler
//! ```

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod password;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Request body limit. Share payloads are the largest bodies accepted.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = if state.config.metrics_enabled {
        match ApiMetrics::new() {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::error!(error = %e, "failed to create metrics registry, metrics disabled");
                None
            }
        }
    } else {
        None
    };

    let mut api = Router::new()
        .merge(routes::jurisdictions::router())
        .merge(routes::comparisons::router())
        .merge(routes::recommendations::router())
        .merge(routes::saved::router())
        .merge(routes::shares::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    if let Some(m) = &metrics {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(m.clone()));
    }

    let api = api.layer(TraceLayer::new_for_http()).with_state(state.clone());

    let mut probes = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if let Some(m) = metrics {
        probes = probes
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(m));
    }

    Router::new().merge(probes.with_state(state)).merge(api)
}

/// GET /metrics — Prometheus scrape endpoint.
///
/// Refreshes store gauges from `AppState` before encoding.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    // Expired links awaiting the sweeper are not live.
    let now = chrono::Utc::now();
    let live: Vec<_> = state
        .shares
        .list()
        .into_iter()
        .filter(|s| !s.is_expired(now))
        .collect();
    let protected = live.iter().filter(|s| s.is_password_protected()).count();
    metrics.set_store_sizes(
        state.saved_comparisons.len(),
        protected,
        live.len() - protected,
    );

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}

/// Liveness probe. Always 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. 503 when a configured database is unreachable.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = db::ping(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return Err(AppError::ServiceUnavailable(
                "database unreachable".to_string(),
            ));
        }
    }

    Ok("ready")
}
