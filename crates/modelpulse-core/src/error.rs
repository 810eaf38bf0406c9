//! Error taxonomy for the monitoring agent.
//!
//! All four runtime failure classes are non-fatal: the owning loop reports
//! them to the logging sink and continues with its next tick. Only startup
//! failures (configuration, I/O) abort the process.

use thiserror::Error;

/// Errors produced by modelpulse components
#[derive(Debug, Error)]
pub enum Error {
    /// The outbound probe could not reach the model endpoint
    #[error("probe transport error: {0}")]
    Transport(String),

    /// The probe response body could not be decoded
    #[error("failed to decode probe response: {0}")]
    Decode(String),

    /// Host CPU/memory counters were unavailable
    #[error("host metrics unavailable: {0}")]
    MetricsRead(String),

    /// Best-effort log delivery failed
    #[error("log sink delivery failed: {0}")]
    Sink(String),

    /// Invalid or unreadable configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error during startup or asset loading
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
