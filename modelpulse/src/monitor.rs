//! Monitor aggregate and scheduler loops.
//!
//! The `Monitor` owns the three state containers and the outbound
//! collaborators, constructed once at startup and shared by reference into
//! the loops and the query router — there are no process-wide singletons.
//!
//! Two independent periodic loops run for the process lifetime:
//! - the probe loop exercises the prediction endpoint and feeds the drift
//!   window and the event log
//! - the resource loop samples host CPU/memory into the metrics store
//!
//! Neither loop holds a lock across an I/O call, and neither ever blocks the
//! other.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use modelpulse_api::prelude::*;
use modelpulse_core::config::Config;
use modelpulse_core::events::{DriftWarning, Record, Sample};
use modelpulse_core::types::{Severity, SystemSnapshot};
use modelpulse_core::Result;
use modelpulse_detection::{DriftConfig, DriftWindow};
use modelpulse_ingestion::prelude::*;
use modelpulse_storage::{EventLog, MetricsStore};
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// The monitoring agent: state containers, collaborators, and scheduling.
pub struct Monitor {
    config: Config,
    event_log: Arc<EventLog>,
    metrics_store: Arc<MetricsStore>,
    drift_window: Arc<Mutex<DriftWindow>>,
    sample_source: Arc<dyn SampleSource>,
    host_metrics: Arc<dyn HostMetricsProvider>,
    sink: Arc<dyn LogSink>,
    started: Instant,
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("config", &self.config)
            .field("sample_source", &self.sample_source.name())
            .field("sink", &self.sink.name())
            .finish()
    }
}

impl Monitor {
    /// Build the monitor with its production collaborators.
    pub fn new(config: Config) -> Result<Self> {
        let source = HttpSampleSource::new(ProbeConfig {
            endpoint: config.model_endpoint.clone(),
            timeout: config.probe_timeout(),
            ..ProbeConfig::default()
        })?;

        Ok(Self::with_sources(
            config,
            Arc::new(source),
            Arc::new(SysinfoProvider::new()),
            Arc::new(StdoutSink::new()),
        ))
    }

    /// Build the monitor with injected collaborators.
    pub fn with_sources(
        config: Config,
        sample_source: Arc<dyn SampleSource>,
        host_metrics: Arc<dyn HostMetricsProvider>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        let drift_config = DriftConfig {
            capacity: config.drift.window_capacity,
            drift_ratio_threshold: config.drift.drift_ratio_threshold,
            confidence_threshold: config.drift.confidence_threshold,
            max_latency_secs: config.drift.max_latency_secs,
        };

        Self {
            event_log: Arc::new(EventLog::with_retention(config.event_log.max_entries)),
            metrics_store: Arc::new(MetricsStore::new()),
            drift_window: Arc::new(Mutex::new(DriftWindow::new(drift_config))),
            sample_source,
            host_metrics,
            sink,
            started: Instant::now(),
            config,
        }
    }

    /// Run the loops and the query server until a shutdown signal arrives.
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Starting monitor loops");

        let monitor = Arc::new(self);

        let probe_loop = {
            let monitor = Arc::clone(&monitor);
            tokio::spawn(async move { monitor.probe_loop().await })
        };

        let resource_loop = {
            let monitor = Arc::clone(&monitor);
            tokio::spawn(async move { monitor.resource_loop().await })
        };

        let api_server = {
            let monitor = Arc::clone(&monitor);
            tokio::spawn(async move { monitor.serve_api().await })
        };

        tokio::select! {
            result = api_server => {
                error!("Query server exited: {:?}", result);
            }
            result = probe_loop => {
                error!("Probe loop exited: {:?}", result);
            }
            result = resource_loop => {
                error!("Resource loop exited: {:?}", result);
            }
            _ = shutdown_signal() => {
                info!("Shutdown signal received");
            }
        }

        info!("Monitor stopped");
        Ok(())
    }

    /// Probe loop: one tick per polling interval, sequential, never
    /// overlapping with itself. An overlong tick delays the next one.
    async fn probe_loop(&self) {
        let mut interval = tokio::time::interval(self.config.polling_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            endpoint = %self.config.model_endpoint,
            interval_secs = self.config.polling_interval_secs,
            "Probe loop started"
        );

        loop {
            interval.tick().await;
            self.probe_tick().await;
        }
    }

    /// One probe tick: probe, record, update drift state, warn on a verdict.
    async fn probe_tick(&self) {
        match self.sample_source.probe().await {
            Ok(sample) => self.record_sample(sample).await,
            Err(err) => {
                // Failures are logged, not retried: the next tick is the retry
                error!(source = self.sample_source.name(), error = %err, "Probe failed");
                self.emit(&format!("probe failed: {err}"), Severity::Error)
                    .await;
            }
        }
    }

    async fn record_sample(&self, sample: Sample) {
        info!(
            prediction = %sample.label,
            latency_secs = sample.latency_secs,
            confidence = sample.effective_confidence(),
            "Observed prediction"
        );
        self.emit(
            &format!(
                "prediction={} response_time={:.4}s confidence={:.2}",
                sample.label,
                sample.latency_secs,
                sample.effective_confidence()
            ),
            Severity::Info,
        )
        .await;

        let label = sample.label.clone();
        let confidence = sample.effective_confidence();
        let latency = sample.latency_secs;

        // Two independent writes from the single writer task: readers may
        // observe the log and the window at slightly different points
        self.event_log.append(Record::Sample(sample)).await;

        let (metrics, fired) = {
            let mut window = self.drift_window.lock().await;
            window.observe(&label, confidence, latency)
        };

        if fired {
            let message = format!(
                "Drift detected: changes={}, confidence drop={:.2}, latency excess={:.2}s",
                metrics.prediction_changes, metrics.confidence_drop, metrics.response_time_spike
            );
            warn!(
                prediction_changes = metrics.prediction_changes,
                confidence_drop = metrics.confidence_drop,
                response_time_spike = metrics.response_time_spike,
                "Drift detected"
            );
            self.event_log
                .append(Record::DriftWarning(DriftWarning::new(&message)))
                .await;
            self.emit(&message, Severity::Warning).await;
        }
    }

    /// Resource loop: independent cadence from the probe loop.
    async fn resource_loop(&self) {
        let mut interval = tokio::time::interval(self.config.resource_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval_secs = self.config.resource_interval_secs,
            "Resource loop started"
        );

        loop {
            interval.tick().await;
            self.resource_tick().await;
        }
    }

    /// One resource tick. A failed counter read is absorbed as a zero
    /// sentinel; the snapshot is overwritten either way so readers never see
    /// stale values.
    async fn resource_tick(&self) {
        let cpu_usage = match self.host_metrics.cpu_percent() {
            Ok(value) => value,
            Err(err) => {
                self.report_metrics_failure(&err).await;
                0.0
            }
        };
        let memory_usage = match self.host_metrics.memory_percent() {
            Ok(value) => value,
            Err(err) => {
                self.report_metrics_failure(&err).await;
                0.0
            }
        };

        self.metrics_store
            .update(SystemSnapshot {
                cpu_usage,
                memory_usage,
                uptime: self.started.elapsed().as_secs_f64(),
            })
            .await;
    }

    async fn report_metrics_failure(&self, err: &modelpulse_core::Error) {
        warn!(error = %err, "Host metric read failed, storing zero sentinel");
        self.emit(&err.to_string(), Severity::Error).await;
    }

    /// Forward a line to the sink; delivery failures are reported locally and
    /// swallowed so they can never stall a loop.
    async fn emit(&self, message: &str, severity: Severity) {
        if let Err(err) = self.sink.emit(message, severity).await {
            warn!(sink = self.sink.name(), error = %err, "Log sink delivery failed");
        }
    }

    /// Serve the read-only query interface.
    async fn serve_api(&self) -> anyhow::Result<()> {
        let api_config = ApiConfig {
            bind_addr: format!("{}:{}", self.config.server.host, self.config.server.port)
                .parse()
                .context("Invalid server bind address")?,
            enable_cors: true,
            timeout_secs: self.config.server.request_timeout_secs,
            static_dir: self.config.server.static_dir.clone(),
            template_path: self.config.server.template_path.clone(),
        };

        let app = create_router(
            &api_config,
            Arc::new(LogsState::new(Arc::clone(&self.event_log))),
            Arc::new(MetricsState::new(Arc::clone(&self.metrics_store))),
            Arc::new(DriftState::new(Arc::clone(&self.drift_window))),
            Arc::new(HealthState::new(env!("CARGO_PKG_VERSION"))),
        );

        let listener = tokio::net::TcpListener::bind(&api_config.bind_addr)
            .await
            .context("Failed to bind query server address")?;
        info!("Query interface listening on {}", api_config.bind_addr);

        axum::serve(listener, app)
            .await
            .context("Query server failed")
    }
}

/// Wait for shutdown signal (SIGTERM or CTRL+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { info!("Received CTRL+C"); },
        _ = terminate => { info!("Received SIGTERM"); },
    }
}
