//! Append-only in-memory record of samples and drift warnings.

use std::collections::VecDeque;

use modelpulse_core::events::Record;
use tokio::sync::RwLock;
use tracing::debug;

/// Ordered, append-only sequence of every sample and drift warning observed
/// during the process lifetime.
///
/// Unbounded by default, matching the stock agent. An optional retention cap
/// evicts the oldest records on append; enabling it is a deliberate,
/// documented deviation from stock behavior.
#[derive(Debug)]
pub struct EventLog {
    records: RwLock<VecDeque<Record>>,
    max_entries: Option<usize>,
}

impl EventLog {
    /// Create an unbounded log.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(VecDeque::new()),
            max_entries: None,
        }
    }

    /// Create a log that retains at most `max_entries` records.
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::with_capacity(max_entries)),
            max_entries: Some(max_entries),
        }
    }

    /// Create a log from the retention setting: `None` means unbounded.
    pub fn with_retention(max_entries: Option<usize>) -> Self {
        match max_entries {
            Some(cap) => Self::bounded(cap),
            None => Self::new(),
        }
    }

    /// Append a record in arrival order. O(1) amortized.
    pub async fn append(&self, record: Record) {
        let mut records = self.records.write().await;
        if let Some(cap) = self.max_entries {
            while records.len() >= cap {
                records.pop_front();
            }
        }
        records.push_back(record);
        debug!(len = records.len(), "Appended record to event log");
    }

    /// Point-in-time copy of all records, in insertion order. O(n).
    ///
    /// A copy, not a live view: the caller never holds the lock while
    /// serializing or iterating.
    pub async fn snapshot(&self) -> Vec<Record> {
        let records = self.records.read().await;
        records.iter().cloned().collect()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when nothing has been recorded yet.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelpulse_core::events::{DriftWarning, Sample};
    use std::sync::Arc;

    fn sample(label: &str) -> Record {
        Record::Sample(Sample::new(label, Some(0.9), 0.1))
    }

    #[tokio::test]
    async fn snapshot_returns_all_records_in_insertion_order() {
        let log = EventLog::new();

        for i in 0..50 {
            log.append(sample(&format!("label-{i}"))).await;
        }
        log.append(Record::DriftWarning(DriftWarning::new("drift detected")))
            .await;

        let records = log.snapshot().await;
        assert_eq!(records.len(), 51);
        for (i, record) in records.iter().take(50).enumerate() {
            match record {
                Record::Sample(s) => assert_eq!(s.label, format!("label-{i}")),
                other => panic!("unexpected record: {other:?}"),
            }
        }
        assert!(matches!(records[50], Record::DriftWarning(_)));
    }

    #[tokio::test]
    async fn snapshot_is_a_copy_not_a_live_view() {
        let log = EventLog::new();
        log.append(sample("before")).await;

        let snapshot = log.snapshot().await;
        log.append(sample("after")).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len().await, 2);
    }

    #[tokio::test]
    async fn concurrent_appends_never_tear() {
        let log = Arc::new(EventLog::new());

        let writers: Vec<_> = (0..8)
            .map(|w| {
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    for i in 0..100 {
                        log.append(sample(&format!("w{w}-{i}"))).await;
                    }
                })
            })
            .collect();

        // Interleave snapshots with the writers; every observed record must
        // be fully formed and serializable
        for _ in 0..20 {
            let records = log.snapshot().await;
            for record in &records {
                serde_json::to_string(record).expect("record must serialize whole");
            }
            tokio::task::yield_now().await;
        }

        for writer in writers {
            writer.await.unwrap();
        }
        assert_eq!(log.len().await, 800);
    }

    #[tokio::test]
    async fn bounded_log_evicts_oldest_first() {
        let log = EventLog::bounded(3);

        for i in 0..5 {
            log.append(sample(&format!("label-{i}"))).await;
        }

        let records = log.snapshot().await;
        assert_eq!(records.len(), 3);
        let labels: Vec<_> = records
            .iter()
            .map(|r| match r {
                Record::Sample(s) => s.label.clone(),
                other => panic!("unexpected record: {other:?}"),
            })
            .collect();
        assert_eq!(labels, vec!["label-2", "label-3", "label-4"]);
    }

    #[tokio::test]
    async fn retention_none_is_unbounded() {
        let log = EventLog::with_retention(None);
        for i in 0..200 {
            log.append(sample(&format!("label-{i}"))).await;
        }
        assert_eq!(log.len().await, 200);
    }
}
