//! Record types appended to the event log.
//!
//! A `Sample` is one observed response from the monitored prediction service;
//! a `DriftWarning` is a synthetic record appended whenever the drift verdict
//! fires. Both are immutable once created. Wire field names match the
//! monitoring agent's published JSON format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed response from the monitored prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Predicted label returned by the service
    #[serde(rename = "prediction")]
    pub label: String,

    /// Wall-clock latency of the probe request, in seconds
    #[serde(rename = "response_time")]
    pub latency_secs: f64,

    /// When the response was observed
    pub timestamp: DateTime<Utc>,

    /// Model confidence in [0, 1]; absent when the service omits it.
    /// An unset confidence participates in drift arithmetic as 0.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Upstream model version, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl Sample {
    /// Create a sample observed now.
    pub fn new(label: impl Into<String>, confidence: Option<f64>, latency_secs: f64) -> Self {
        Self {
            label: label.into(),
            latency_secs,
            timestamp: Utc::now(),
            confidence,
            model_version: None,
        }
    }

    /// Attach the upstream model version.
    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }

    /// Confidence as used by the drift arithmetic: unset reads as 0.0.
    pub fn effective_confidence(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }
}

/// Synthetic record appended when a drift verdict fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftWarning {
    /// Human-readable description of the fired signals
    pub message: String,

    /// When the verdict fired
    pub timestamp: DateTime<Utc>,
}

impl DriftWarning {
    /// Create a warning stamped now.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Unified element type of the event log, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    /// A probe response
    Sample(Sample),
    /// A fired drift verdict
    DriftWarning(DriftWarning),
}

impl Record {
    /// Timestamp of the underlying record.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Record::Sample(s) => s.timestamp,
            Record::DriftWarning(w) => w.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_serializes_with_wire_names() {
        let sample = Sample::new("positive", Some(0.92), 0.1234);
        let json = serde_json::to_value(&sample).unwrap();

        assert_eq!(json["prediction"], "positive");
        assert_eq!(json["response_time"], 0.1234);
        assert_eq!(json["confidence"], 0.92);
        assert!(json.get("model_version").is_none());
    }

    #[test]
    fn unset_confidence_is_omitted_and_reads_as_zero() {
        let sample = Sample::new("negative", None, 0.2);
        let json = serde_json::to_value(&sample).unwrap();

        assert!(json.get("confidence").is_none());
        assert_eq!(sample.effective_confidence(), 0.0);
    }

    #[test]
    fn record_round_trips_tagged() {
        let record = Record::DriftWarning(DriftWarning::new("drift detected"));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"drift_warning\""));

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
