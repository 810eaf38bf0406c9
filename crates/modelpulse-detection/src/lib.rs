//! # Modelpulse Detection
//!
//! Sliding-window drift analysis over the stream of probe samples.
//!
//! The engine keeps a fixed-capacity FIFO window of recent prediction labels
//! and, on every sample, recomputes three independent drift signals:
//! label change rate, confidence deficit, and latency excess. Any single
//! fired signal yields a positive drift verdict; there is no composite score.

#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

pub mod window;

pub use window::{DriftConfig, DriftWindow};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::window::{DriftConfig, DriftWindow};
}
