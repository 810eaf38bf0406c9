//! Best-effort log line delivery.

use async_trait::async_trait;
use modelpulse_core::types::Severity;
use modelpulse_core::Result;
use tracing::{error, info, warn};

/// Fire-and-forget sink for monitor log lines.
///
/// Delivery is best-effort: a failed emit is reported locally by the caller
/// and otherwise swallowed. Implementations must never block the scheduler
/// loops on slow transports beyond their own internal deadlines.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Sink name for logging
    fn name(&self) -> &'static str;

    /// Deliver one line at the given severity.
    async fn emit(&self, message: &str, severity: Severity) -> Result<()>;
}

/// Sink that writes lines to the local process log. Stands in for a remote
/// shipping transport, which is out of scope here.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl StdoutSink {
    /// Create a stdout sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LogSink for StdoutSink {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn emit(&self, message: &str, severity: Severity) -> Result<()> {
        match severity {
            Severity::Info => info!(target: "modelpulse::sink", "{message}"),
            Severity::Warning => warn!(target: "modelpulse::sink", "{message}"),
            Severity::Error => error!(target: "modelpulse::sink", "{message}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stdout_sink_never_fails() {
        let sink = StdoutSink::new();
        for severity in [Severity::Info, Severity::Warning, Severity::Error] {
            sink.emit("drift detected", severity).await.unwrap();
        }
    }
}
