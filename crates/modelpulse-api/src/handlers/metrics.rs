//! Host metrics query handler.
//!
//! - `GET /metrics` - current host resource snapshot

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use modelpulse_storage::MetricsStore;
use tracing::instrument;

/// Shared state for the host metrics handler
#[derive(Debug)]
pub struct MetricsState {
    /// The monitor's metrics store
    pub store: Arc<MetricsStore>,
}

impl MetricsState {
    /// Create the handler state.
    pub fn new(store: Arc<MetricsStore>) -> Self {
        Self { store }
    }
}

/// GET /metrics
///
/// Returns the snapshot written by the most recent resource tick.
#[instrument(skip(state))]
pub async fn get_metrics(State(state): State<Arc<MetricsState>>) -> impl IntoResponse {
    let snapshot = state.store.read().await;
    (StatusCode::OK, Json(snapshot))
}
