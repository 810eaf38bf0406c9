//! Operator dashboard handler.
//!
//! - `GET /` - serves the dashboard template

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use tracing::{error, instrument};

/// Shared state for the dashboard handler
#[derive(Debug)]
pub struct DashboardState {
    /// Template file served as the dashboard page
    pub template_path: PathBuf,
}

impl DashboardState {
    /// Create the handler state.
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }
}

/// GET /
///
/// Reads the template on every request so operators can edit it without a
/// restart. An unreadable template is a 500, nothing else in the agent is
/// affected.
#[instrument(skip(state))]
pub async fn dashboard(State(state): State<Arc<DashboardState>>) -> impl IntoResponse {
    match tokio::fs::read_to_string(&state.template_path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!(
                path = %state.template_path.display(),
                error = %e,
                "Failed to load dashboard template"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load dashboard").into_response()
        }
    }
}
