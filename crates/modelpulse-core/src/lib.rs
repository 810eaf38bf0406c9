//! # Modelpulse Core
//!
//! Shared foundation for the modelpulse monitoring agent.
//!
//! This crate provides:
//! - Record types flowing through the system (`Sample`, `DriftWarning`)
//! - Derived metric types (`DriftMetrics`, `SystemSnapshot`)
//! - The error taxonomy and crate-wide `Result` alias
//! - The startup configuration surface

#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, DriftSettings, EventLogSettings, ServerSettings};
    pub use crate::events::{DriftWarning, Record, Sample};
    pub use crate::types::{DriftMetrics, Severity, SystemSnapshot};
    pub use crate::{Error, Result};
}
