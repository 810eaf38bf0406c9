//! Derived metric types exposed over the query surface.

use serde::{Deserialize, Serialize};

/// Drift signals recomputed on every observed sample.
///
/// Always a pure function of the current label window, the latest sample and
/// the configured thresholds; never accumulated across ticks. Wire field
/// names match the agent's published JSON format.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriftMetrics {
    /// Count of adjacent label inequalities in the current window
    pub prediction_changes: usize,

    /// `max(0, confidence_threshold - latest confidence)`
    pub confidence_drop: f64,

    /// `max(0, latest latency - max_latency)` in seconds
    pub response_time_spike: f64,
}

/// Current host resource snapshot; overwritten each resource tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Host CPU utilization percentage
    pub cpu_usage: f64,

    /// Host memory utilization percentage
    pub memory_usage: f64,

    /// Seconds since the agent started
    pub uptime: f64,
}

/// Severity attached to lines forwarded to the logging sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_metrics_wire_names() {
        let metrics = DriftMetrics {
            prediction_changes: 3,
            confidence_drop: 0.25,
            response_time_spike: 0.5,
        };
        let json = serde_json::to_value(metrics).unwrap();

        assert_eq!(json["prediction_changes"], 3);
        assert_eq!(json["confidence_drop"], 0.25);
        assert_eq!(json["response_time_spike"], 0.5);
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Warning.to_string(), "WARNING");
        assert_eq!(Severity::Error.to_string(), "ERROR");
    }
}
