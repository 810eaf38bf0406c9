//! Drift metrics query handler.
//!
//! - `GET /drift-metrics` - drift signals from the latest observation

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use modelpulse_detection::DriftWindow;
use tokio::sync::Mutex;
use tracing::instrument;

/// Shared state for the drift metrics handler
#[derive(Debug)]
pub struct DriftState {
    /// The drift window shared with the probe loop
    pub window: Arc<Mutex<DriftWindow>>,
}

impl DriftState {
    /// Create the handler state.
    pub fn new(window: Arc<Mutex<DriftWindow>>) -> Self {
        Self { window }
    }
}

/// GET /drift-metrics
///
/// Returns the metrics computed by the most recent `observe` call, or zeros
/// before the first sample arrives. The window lock is held only for the
/// copy-out.
#[instrument(skip(state))]
pub async fn get_drift_metrics(State(state): State<Arc<DriftState>>) -> impl IntoResponse {
    let metrics = state.window.lock().await.metrics();
    (StatusCode::OK, Json(metrics))
}
