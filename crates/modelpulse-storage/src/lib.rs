//! # Modelpulse Storage
//!
//! Memory-resident state containers for the monitoring agent.
//!
//! This crate provides:
//! - [`EventLog`]: append-only record of samples and drift warnings
//! - [`MetricsStore`]: the most recent host resource snapshot
//!
//! Each container carries its own lock; readers always receive point-in-time
//! copies, never views into locked state. Nothing here survives a restart —
//! persistence is an explicit non-goal.

#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

pub mod event_log;
pub mod metrics_store;

pub use event_log::EventLog;
pub use metrics_store::MetricsStore;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::event_log::EventLog;
    pub use crate::metrics_store::MetricsStore;
}
