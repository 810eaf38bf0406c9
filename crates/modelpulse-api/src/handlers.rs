//! API request handlers.
//!
//! One module per query domain:
//! - event log (`/logs`)
//! - host metrics (`/metrics`)
//! - drift metrics (`/drift-metrics`)
//! - health (`/health`)
//! - dashboard (`/`)

pub mod dashboard;
pub mod drift;
pub mod health;
pub mod logs;
pub mod metrics;

pub use dashboard::*;
pub use drift::*;
pub use health::*;
pub use logs::*;
pub use metrics::*;
