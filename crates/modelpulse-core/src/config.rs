//! Startup configuration.
//!
//! Loaded once from a YAML file; every field has a default reproducing the
//! agent's stock behavior, so a partial (or absent) file is valid. Static for
//! the process lifetime — there is no runtime reconfiguration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Error, Result};

/// Top-level agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prediction endpoint exercised by the probe loop
    pub model_endpoint: String,

    /// Seconds between probe ticks
    pub polling_interval_secs: u64,

    /// Seconds between host resource ticks
    pub resource_interval_secs: u64,

    /// Deadline for a single probe request, in seconds.
    /// The source agent had none; a hung upstream stalls only the probe loop.
    pub probe_timeout_secs: u64,

    /// Drift detection thresholds
    pub drift: DriftSettings,

    /// Query server settings
    pub server: ServerSettings,

    /// Event log retention settings
    pub event_log: EventLogSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_endpoint: "http://127.0.0.1:5000/predict".to_string(),
            polling_interval_secs: 5,
            resource_interval_secs: 1,
            probe_timeout_secs: 10,
            drift: DriftSettings::default(),
            server: ServerSettings::default(),
            event_log: EventLogSettings::default(),
        }
    }
}

/// Thresholds driving the drift verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriftSettings {
    /// Sliding window capacity (number of retained labels)
    pub window_capacity: usize,

    /// Fraction of the window capacity that adjacent label changes must
    /// reach for the change signal to fire
    pub drift_ratio_threshold: f64,

    /// Confidence floor; samples below it fire the confidence signal
    pub confidence_threshold: f64,

    /// Latency ceiling in seconds; samples above it fire the latency signal
    pub max_latency_secs: f64,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            window_capacity: 10,
            drift_ratio_threshold: 0.5,
            confidence_threshold: 0.8,
            max_latency_secs: 1.0,
        }
    }
}

/// Query server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Directory served under `/static`
    pub static_dir: String,

    /// Dashboard template rendered at `/`
    pub template_path: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            static_dir: "static".to_string(),
            template_path: "templates/dashboard.html".to_string(),
        }
    }
}

/// Event log retention.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventLogSettings {
    /// Optional retention cap; `None` preserves the agent's stock unbounded
    /// in-memory growth. When set, the oldest records are evicted on append.
    pub max_entries: Option<usize>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists; otherwise fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.model_endpoint.is_empty() {
            return Err(Error::Config("model_endpoint must not be empty".into()));
        }
        if self.polling_interval_secs == 0 || self.resource_interval_secs == 0 {
            return Err(Error::Config("intervals must be at least 1 second".into()));
        }
        if self.drift.window_capacity == 0 {
            return Err(Error::Config("drift.window_capacity must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.drift.drift_ratio_threshold) {
            return Err(Error::Config(
                "drift.drift_ratio_threshold must be within [0, 1]".into(),
            ));
        }
        if self.drift.max_latency_secs <= 0.0 {
            return Err(Error::Config("drift.max_latency_secs must be positive".into()));
        }
        Ok(())
    }

    /// Probe loop cadence.
    pub fn polling_interval(&self) -> Duration {
        Duration::from_secs(self.polling_interval_secs)
    }

    /// Resource loop cadence.
    pub fn resource_interval(&self) -> Duration {
        Duration::from_secs(self.resource_interval_secs)
    }

    /// Probe request deadline.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_behavior() {
        let config = Config::default();

        assert_eq!(config.model_endpoint, "http://127.0.0.1:5000/predict");
        assert_eq!(config.polling_interval_secs, 5);
        assert_eq!(config.resource_interval_secs, 1);
        assert_eq!(config.drift.window_capacity, 10);
        assert_eq!(config.drift.drift_ratio_threshold, 0.5);
        assert_eq!(config.drift.confidence_threshold, 0.8);
        assert_eq!(config.drift.max_latency_secs, 1.0);
        assert_eq!(config.server.port, 8080);
        assert!(config.event_log.max_entries.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_overrides_defaults() {
        let yaml = r#"
model_endpoint: "http://model.internal:9000/predict"
drift:
  window_capacity: 20
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.model_endpoint, "http://model.internal:9000/predict");
        assert_eq!(config.drift.window_capacity, 20);
        // Untouched sections keep their defaults
        assert_eq!(config.drift.confidence_threshold, 0.8);
        assert_eq!(config.polling_interval_secs, 5);
    }

    #[test]
    fn rejects_invalid_thresholds() {
        let mut config = Config::default();
        config.drift.drift_ratio_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.drift.window_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.polling_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        let yaml = "mode_endpoint: typo\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }
}
