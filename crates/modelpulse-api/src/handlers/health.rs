//! Health handler.
//!
//! - `GET /health` - liveness, version, uptime

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::instrument;

/// Shared state for the health handler
#[derive(Debug)]
pub struct HealthState {
    /// Agent version string
    pub version: String,
    /// Process start time
    pub started: Instant,
}

impl HealthState {
    /// Create the handler state, stamping the start time now.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            started: Instant::now(),
        }
    }
}

/// Health response body
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: &'static str,
    /// Agent version
    pub version: String,
    /// Seconds since startup
    pub uptime_secs: f64,
}

/// GET /health
#[instrument(skip(state))]
pub async fn health(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok",
        version: state.version.clone(),
        uptime_secs: state.started.elapsed().as_secs_f64(),
    };
    (StatusCode::OK, Json(response))
}
