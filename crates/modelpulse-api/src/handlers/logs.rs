//! Event log query handler.
//!
//! - `GET /logs` - ordered sequence of all recorded samples and warnings

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use modelpulse_storage::EventLog;
use tracing::instrument;

/// Shared state for the event log handler
#[derive(Debug)]
pub struct LogsState {
    /// The monitor's event log
    pub event_log: Arc<EventLog>,
}

impl LogsState {
    /// Create the handler state.
    pub fn new(event_log: Arc<EventLog>) -> Self {
        Self { event_log }
    }
}

/// GET /logs
///
/// Returns every sample and drift warning recorded during the process
/// lifetime, in arrival order. The body is a point-in-time copy; the log's
/// lock is released before serialization.
#[instrument(skip(state))]
pub async fn get_logs(State(state): State<Arc<LogsState>>) -> impl IntoResponse {
    let records = state.event_log.snapshot().await;
    (StatusCode::OK, Json(records))
}
