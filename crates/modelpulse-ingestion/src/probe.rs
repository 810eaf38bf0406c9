//! HTTP probe against the monitored prediction endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use modelpulse_core::events::Sample;
use modelpulse_core::{Error, Result};
use serde::Deserialize;
use tracing::{debug, warn};

/// Source of probe samples.
///
/// One call issues one outbound request and yields a typed sample or a
/// failure. Implementations must not retry internally — the next scheduled
/// tick is the retry.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Source name for logging
    fn name(&self) -> &'static str;

    /// Issue one probe and decode the response.
    async fn probe(&self) -> Result<Sample>;
}

/// Probe configuration.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Prediction endpoint URL
    pub endpoint: String,

    /// Request deadline. The stock agent had none; a hung upstream would
    /// stall the probe loop indefinitely without this.
    pub timeout: Duration,

    /// Text carried in the fixed probe payload
    pub payload_text: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/predict".to_string(),
            timeout: Duration::from_secs(10),
            payload_text: "Hello model!".to_string(),
        }
    }
}

/// Response body of the prediction endpoint.
///
/// Every field defaults when absent, mirroring the upstream contract: real
/// deployments frequently omit `confidence` and `model_version`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PredictionResponse {
    pub prediction: String,
    pub confidence: Option<f64>,
    pub model_version: Option<String>,
    pub error: Option<String>,
}

impl PredictionResponse {
    /// Convert into a [`Sample`] stamped now, with the measured latency.
    pub fn into_sample(self, latency_secs: f64) -> Sample {
        let mut sample = Sample::new(self.prediction, self.confidence, latency_secs);
        if let Some(version) = self.model_version {
            sample = sample.with_model_version(version);
        }
        sample
    }
}

/// `SampleSource` that POSTs a fixed JSON payload to the configured endpoint
/// and measures wall-clock latency up to and including the body read.
#[derive(Debug)]
pub struct HttpSampleSource {
    config: ProbeConfig,
    client: reqwest::Client,
}

impl HttpSampleSource {
    /// Build the source, including the probe-scoped HTTP client.
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl SampleSource for HttpSampleSource {
    fn name(&self) -> &'static str {
        "http-probe"
    }

    async fn probe(&self) -> Result<Sample> {
        let payload = serde_json::json!({ "text": self.config.payload_text });

        let start = Instant::now();
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let latency_secs = start.elapsed().as_secs_f64();

        let decoded: PredictionResponse =
            serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;

        if let Some(upstream_error) = &decoded.error {
            warn!(error = %upstream_error, "Prediction endpoint reported an error field");
        }
        debug!(
            prediction = %decoded.prediction,
            latency_secs,
            "Probe completed"
        );

        Ok(decoded.into_sample(latency_secs))
    }
}
