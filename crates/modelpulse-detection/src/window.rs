//! Fixed-capacity sliding window over recent prediction labels.

use std::collections::VecDeque;

use modelpulse_core::types::DriftMetrics;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Drift detection thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Number of labels retained in the window
    pub capacity: usize,

    /// Fraction of the window capacity that adjacent label changes must
    /// reach for the change signal to fire
    pub drift_ratio_threshold: f64,

    /// Confidence floor for the confidence signal
    pub confidence_threshold: f64,

    /// Latency ceiling in seconds for the latency signal
    pub max_latency_secs: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            drift_ratio_threshold: 0.5,
            confidence_threshold: 0.8,
            max_latency_secs: 1.0,
        }
    }
}

impl DriftConfig {
    /// Number of adjacent label changes at which the change signal fires:
    /// `floor(capacity * drift_ratio_threshold)`.
    pub fn change_threshold(&self) -> usize {
        (self.capacity as f64 * self.drift_ratio_threshold).floor() as usize
    }
}

/// FIFO window of the last N prediction labels plus the metrics derived from
/// the most recent observation.
///
/// Single-writer: one scheduler task calls [`observe`](Self::observe); readers
/// take a copy of [`metrics`](Self::metrics). Shared access is mediated by the
/// caller's lock.
#[derive(Debug)]
pub struct DriftWindow {
    config: DriftConfig,
    labels: VecDeque<String>,
    metrics: DriftMetrics,
}

impl DriftWindow {
    /// Create an empty window.
    pub fn new(config: DriftConfig) -> Self {
        info!(
            capacity = config.capacity,
            change_threshold = config.change_threshold(),
            confidence_threshold = config.confidence_threshold,
            max_latency_secs = config.max_latency_secs,
            "Creating drift window"
        );
        let labels = VecDeque::with_capacity(config.capacity);
        Self {
            config,
            labels,
            metrics: DriftMetrics::default(),
        }
    }

    /// Record one observation and recompute the drift signals.
    ///
    /// Appends `label`, evicting the oldest entry once the window is at
    /// capacity. The returned metrics are a pure function of the resulting
    /// window, the given sample, and the configured thresholds; the verdict is
    /// a logical OR across the three signals. Out-of-range confidence values
    /// are accepted as-is and simply affect the arithmetic.
    pub fn observe(
        &mut self,
        label: &str,
        confidence: f64,
        latency_secs: f64,
    ) -> (DriftMetrics, bool) {
        if self.labels.len() == self.config.capacity {
            self.labels.pop_front();
        }
        self.labels.push_back(label.to_string());

        let prediction_changes = self.count_changes();
        let confidence_drop = (self.config.confidence_threshold - confidence).max(0.0);
        let response_time_spike = (latency_secs - self.config.max_latency_secs).max(0.0);

        self.metrics = DriftMetrics {
            prediction_changes,
            confidence_drop,
            response_time_spike,
        };

        let fired = prediction_changes >= self.config.change_threshold()
            || confidence_drop > 0.0
            || response_time_spike > 0.0;

        debug!(
            label,
            prediction_changes,
            confidence_drop,
            response_time_spike,
            fired,
            "Observed sample"
        );

        (self.metrics, fired)
    }

    /// Adjacent label inequalities, by full linear scan. The window is small
    /// and bounded; no incremental bookkeeping.
    fn count_changes(&self) -> usize {
        self.labels
            .iter()
            .zip(self.labels.iter().skip(1))
            .filter(|(prev, next)| prev != next)
            .count()
    }

    /// Metrics derived from the most recent observation.
    pub fn metrics(&self) -> DriftMetrics {
        self.metrics
    }

    /// Number of labels currently held.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when no sample has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Retained labels in arrival order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> DriftWindow {
        DriftWindow::new(DriftConfig::default())
    }

    /// Confident, fast, label-stable observation that fires nothing.
    fn calm(window: &mut DriftWindow) -> (DriftMetrics, bool) {
        window.observe("positive", 0.95, 0.1)
    }

    #[test]
    fn window_never_exceeds_capacity_and_keeps_last_n() {
        let mut window = window();

        for i in 0..25 {
            window.observe(&format!("label-{i}"), 0.95, 0.1);
            assert!(window.len() <= 10);
        }

        let retained: Vec<&str> = window.labels().collect();
        let expected: Vec<String> = (15..25).map(|i| format!("label-{i}")).collect();
        assert_eq!(retained, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn alternating_labels_fire_on_change_rate_alone() {
        let mut window = window();

        let mut last = (DriftMetrics::default(), false);
        for i in 0..10 {
            let label = if i % 2 == 0 { "A" } else { "B" };
            last = window.observe(label, 0.95, 0.1);
        }

        let (metrics, fired) = last;
        assert_eq!(metrics.prediction_changes, 9);
        assert_eq!(metrics.confidence_drop, 0.0);
        assert_eq!(metrics.response_time_spike, 0.0);
        assert!(fired, "9 changes >= floor(10 * 0.5) must fire");
    }

    #[test]
    fn change_threshold_boundary_uses_floor_of_capacity() {
        let config = DriftConfig::default();
        assert_eq!(config.change_threshold(), 5);

        let mut window = DriftWindow::new(config);
        // A A A A A B A A A A -> exactly 2 changes: below threshold
        for label in ["A", "A", "A", "A", "A", "B", "A", "A", "A", "A"] {
            window.observe(label, 0.95, 0.1);
        }
        let (metrics, fired) = calm(&mut window);
        assert!(metrics.prediction_changes < 5);
        assert!(!fired);

        // Push alternations until the count reaches the threshold
        let mut fired_at_threshold = false;
        for i in 0..10 {
            let label = if i % 2 == 0 { "B" } else { "A" };
            let (metrics, fired) = window.observe(label, 0.95, 0.1);
            if metrics.prediction_changes >= 5 {
                fired_at_threshold = fired;
                break;
            }
        }
        assert!(fired_at_threshold, "reaching the floor threshold must fire");
    }

    #[test]
    fn low_confidence_fires_independently() {
        let mut window = window();
        for _ in 0..5 {
            calm(&mut window);
        }

        let (metrics, fired) = window.observe("positive", 0.5, 0.1);
        assert_eq!(metrics.prediction_changes, 0);
        assert!((metrics.confidence_drop - 0.3).abs() < 1e-9);
        assert_eq!(metrics.response_time_spike, 0.0);
        assert!(fired);
    }

    #[test]
    fn high_latency_fires_independently() {
        let mut window = window();
        for _ in 0..5 {
            calm(&mut window);
        }

        let (metrics, fired) = window.observe("positive", 0.95, 1.5);
        assert_eq!(metrics.prediction_changes, 0);
        assert_eq!(metrics.confidence_drop, 0.0);
        assert!((metrics.response_time_spike - 0.5).abs() < 1e-9);
        assert!(fired);
    }

    #[test]
    fn unset_confidence_observed_as_zero_fires() {
        let mut window = window();
        let (metrics, fired) = window.observe("positive", 0.0, 0.1);

        assert!((metrics.confidence_drop - 0.8).abs() < 1e-9);
        assert!(fired);
    }

    #[test]
    fn calm_stream_never_fires() {
        let mut window = window();
        for _ in 0..20 {
            let (_, fired) = calm(&mut window);
            assert!(!fired);
        }
    }

    #[test]
    fn metrics_reflect_only_the_latest_sample() {
        let mut window = window();

        let (metrics, fired) = window.observe("positive", 0.95, 2.0);
        assert!(fired);
        assert!(metrics.response_time_spike > 0.0);

        // The next fast, confident sample clears both point signals
        let (metrics, fired) = calm(&mut window);
        assert_eq!(metrics.response_time_spike, 0.0);
        assert_eq!(metrics.confidence_drop, 0.0);
        assert!(!fired);
        assert_eq!(window.metrics(), metrics);
    }

    #[test]
    fn change_count_is_idempotent_for_same_window() {
        let mut window = window();
        for label in ["A", "B", "B", "C"] {
            window.observe(label, 0.95, 0.1);
        }
        let first = window.metrics().prediction_changes;
        assert_eq!(first, 2);

        // Re-observing the same trailing label leaves the adjacent-pair
        // count derived purely from window contents
        let (metrics, _) = window.observe("C", 0.95, 0.1);
        assert_eq!(metrics.prediction_changes, 2);
    }
}
