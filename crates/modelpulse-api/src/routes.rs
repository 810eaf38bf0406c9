//! API route definitions.
//!
//! The monitor exposes a single read-only service:
//!
//! - `GET /logs`, `GET /metrics`, `GET /drift-metrics` - state queries
//! - `GET /health` - liveness
//! - `GET /` - operator dashboard
//! - `GET /static/*` - static asset passthrough

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::handlers::{
    dashboard::{dashboard, DashboardState},
    drift::{get_drift_metrics, DriftState},
    health::{health, HealthState},
    logs::{get_logs, LogsState},
    metrics::{get_metrics, MetricsState},
};
use crate::ApiConfig;

/// Create the query router.
///
/// Each handler group carries its own state so no query path touches a lock
/// it does not need.
pub fn create_router(
    config: &ApiConfig,
    logs_state: Arc<LogsState>,
    metrics_state: Arc<MetricsState>,
    drift_state: Arc<DriftState>,
    health_state: Arc<HealthState>,
) -> Router {
    let dashboard_state = Arc::new(DashboardState::new(config.template_path.clone()));

    let logs_routes = Router::new()
        .route("/logs", get(get_logs))
        .with_state(logs_state);
    let metrics_routes = Router::new()
        .route("/metrics", get(get_metrics))
        .with_state(metrics_state);
    let drift_routes = Router::new()
        .route("/drift-metrics", get(get_drift_metrics))
        .with_state(drift_state);
    let health_routes = Router::new()
        .route("/health", get(health))
        .with_state(health_state);
    let dashboard_routes = Router::new()
        .route("/", get(dashboard))
        .with_state(dashboard_state);

    let app = Router::new()
        .merge(logs_routes)
        .merge(metrics_routes)
        .merge(drift_routes)
        .merge(health_routes)
        .merge(dashboard_routes)
        .nest_service("/static", ServeDir::new(&config.static_dir));

    let app = if config.enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
    } else {
        app
    };

    app.layer(TimeoutLayer::new(Duration::from_secs(config.timeout_secs)))
}
