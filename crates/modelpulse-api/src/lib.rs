//! # Modelpulse API
//!
//! Read-only HTTP query surface over the monitor's state containers.
//!
//! Endpoints:
//! - `GET /logs` - every sample and drift warning recorded so far
//! - `GET /metrics` - current host resource snapshot
//! - `GET /drift-metrics` - drift signals from the latest observation
//! - `GET /health` - liveness and version
//! - `GET /` - operator dashboard
//! - `GET /static/*` - static assets
//!
//! Handlers only ever copy out last-known-good state; no runtime error of the
//! scheduler loops is surfaced here.

#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

use std::net::SocketAddr;

pub mod handlers;
pub mod routes;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Socket address the server binds to
    pub bind_addr: SocketAddr,

    /// Enable permissive CORS for dashboard consumers
    pub enable_cors: bool,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Directory served under `/static`
    pub static_dir: String,

    /// Dashboard template rendered at `/`
    pub template_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], 8080).into(),
            enable_cors: true,
            timeout_secs: 30,
            static_dir: "static".to_string(),
            template_path: "templates/dashboard.html".to_string(),
        }
    }
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::handlers::{DriftState, HealthState, LogsState, MetricsState};
    pub use crate::routes::create_router;
    pub use crate::ApiConfig;
}
