//! Host CPU and memory counters.

use std::sync::Mutex;

use modelpulse_core::{Error, Result};
use sysinfo::System;

/// Reader of host resource counters.
///
/// Callers absorb failures as zero sentinels; implementations report the
/// failure cause but must never panic or block.
pub trait HostMetricsProvider: Send + Sync {
    /// Current CPU utilization percentage across all cores
    fn cpu_percent(&self) -> Result<f64>;

    /// Current memory utilization percentage
    fn memory_percent(&self) -> Result<f64>;
}

/// `HostMetricsProvider` backed by `sysinfo`.
///
/// The `System` handle is refreshed on every read; CPU usage is derived from
/// the delta between consecutive refreshes, so the first tick after startup
/// legitimately reads near zero.
#[derive(Debug)]
pub struct SysinfoProvider {
    system: Mutex<System>,
}

impl SysinfoProvider {
    /// Create a provider with a primed `System` handle.
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        system.refresh_memory();
        Self {
            system: Mutex::new(system),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, System> {
        // A poisoned lock means a panic mid-refresh; the System handle has no
        // invariants a partial refresh can break, so keep serving
        self.system.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HostMetricsProvider for SysinfoProvider {
    fn cpu_percent(&self) -> Result<f64> {
        let mut system = self.lock();
        system.refresh_cpu_usage();
        if system.cpus().is_empty() {
            return Err(Error::MetricsRead("no cpu entries reported".into()));
        }
        Ok(f64::from(system.global_cpu_info().cpu_usage()))
    }

    fn memory_percent(&self) -> Result<f64> {
        let mut system = self.lock();
        system.refresh_memory();
        let total = system.total_memory();
        if total == 0 {
            return Err(Error::MetricsRead("total memory reported as zero".into()));
        }
        Ok(system.used_memory() as f64 / total as f64 * 100.0)
    }
}
