//! Holder of the most recent host resource snapshot.

use modelpulse_core::types::SystemSnapshot;
use tokio::sync::RwLock;

/// Most recent host resource snapshot. Overwrite semantics: no history, no
/// averaging. A failed host read is absorbed upstream as zero sentinels, so
/// the stored value is always the outcome of the latest tick, never stale.
#[derive(Debug, Default)]
pub struct MetricsStore {
    snapshot: RwLock<SystemSnapshot>,
}

impl MetricsStore {
    /// Create a store holding a zeroed snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot.
    pub async fn update(&self, snapshot: SystemSnapshot) {
        *self.snapshot.write().await = snapshot;
    }

    /// Point-in-time copy of the stored snapshot.
    pub async fn read(&self) -> SystemSnapshot {
        *self.snapshot.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_overwrites_previous_value() {
        let store = MetricsStore::new();

        store
            .update(SystemSnapshot {
                cpu_usage: 42.0,
                memory_usage: 63.5,
                uptime: 10.0,
            })
            .await;
        store
            .update(SystemSnapshot {
                cpu_usage: 12.0,
                memory_usage: 30.0,
                uptime: 11.0,
            })
            .await;

        let snapshot = store.read().await;
        assert_eq!(snapshot.cpu_usage, 12.0);
        assert_eq!(snapshot.memory_usage, 30.0);
        assert_eq!(snapshot.uptime, 11.0);
    }

    #[tokio::test]
    async fn failed_read_sentinels_replace_stale_values() {
        let store = MetricsStore::new();
        store
            .update(SystemSnapshot {
                cpu_usage: 88.0,
                memory_usage: 77.0,
                uptime: 100.0,
            })
            .await;

        // The resource loop absorbs a failed host read by storing zeros with
        // an advancing uptime rather than leaving the previous values behind
        store
            .update(SystemSnapshot {
                cpu_usage: 0.0,
                memory_usage: 0.0,
                uptime: 101.0,
            })
            .await;

        let snapshot = store.read().await;
        assert_eq!(snapshot.cpu_usage, 0.0);
        assert_eq!(snapshot.memory_usage, 0.0);
        assert_eq!(snapshot.uptime, 101.0);
    }
}
