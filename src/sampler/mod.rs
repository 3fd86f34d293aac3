// Host telemetry sampling: instantaneous readings plus rates derived from cumulative counters.

mod inventory;
mod linux;
mod source;

pub use inventory::{
    HardwareInventory, Inventory, LinuxInventory, UnsupportedInventory, platform_inventory,
};
pub use source::SysinfoSource;

use crate::models::{
    CounterSnapshot, DiskCounters, DiskIoRates, DiskUsage, NetworkCounters, NetworkRates,
    StaticSystemInfo,
};
use std::time::{Duration, Instant, SystemTime};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("volume not found: {0}")]
    VolumeNotFound(String),
    #[error("{0} counters unavailable")]
    CounterUnavailable(&'static str),
}

/// Mean of per-core percentages; 0 when no cores are reported.
pub fn cpu_average(cores: &[f32]) -> f64 {
    if cores.is_empty() {
        return 0.0;
    }
    cores.iter().map(|&c| c as f64).sum::<f64>() / cores.len() as f64
}

/// Raw OS telemetry. Counters are cumulative since boot.
pub trait TelemetrySource {
    fn cpu_per_core(&mut self) -> Vec<f32>;
    fn memory_percent(&mut self) -> f64;
    fn volume_usage(&mut self, volume_id: &str) -> Result<DiskUsage, SampleError>;
    fn network_counters(&mut self) -> Result<NetworkCounters, SampleError>;
    fn disk_counters(&mut self) -> Result<DiskCounters, SampleError>;
    fn boot_time(&self) -> SystemTime;
}

/// Owns the previous counter readings and turns each poll into rates.
///
/// Every method is fault-isolated: a failing resource yields a neutral value and a log line,
/// never an error, so one bad reading cannot blank the rest of a tick.
pub struct Sampler<S = SysinfoSource> {
    source: S,
    inventory: Box<dyn HardwareInventory>,
    interval: Duration,
    last_network: Option<NetworkCounters>,
    last_disk: Option<DiskCounters>,
    uptime_at_start: Duration,
    started: Instant,
}

impl Sampler<SysinfoSource> {
    /// Sampler over the live OS with the platform's hardware inventory.
    pub fn new(interval: Duration) -> Self {
        Self::with_source(SysinfoSource::new(), platform_inventory(), interval)
    }
}

impl<S: TelemetrySource> Sampler<S> {
    /// `interval` is the poll period rates are divided by; it is not measured.
    ///
    /// Counter baselines are read here, so the first `network_rates`/`disk_io_rates` call reports
    /// growth since construction.
    pub fn with_source(
        mut source: S,
        inventory: Box<dyn HardwareInventory>,
        interval: Duration,
    ) -> Self {
        let last_network = source
            .network_counters()
            .inspect_err(|e| tracing::warn!(error = %e, "no network counter baseline"))
            .ok();
        let last_disk = source
            .disk_counters()
            .inspect_err(|e| tracing::warn!(error = %e, "no disk counter baseline"))
            .ok();
        let uptime_at_start = SystemTime::now()
            .duration_since(source.boot_time())
            .unwrap_or_default();
        Self {
            source,
            inventory,
            interval,
            last_network,
            last_disk,
            uptime_at_start,
            started: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Percent per logical core, in [0, 100].
    pub fn cpu_usage(&mut self) -> Vec<f32> {
        self.source.cpu_per_core()
    }

    pub fn ram_usage(&mut self) -> f64 {
        self.source.memory_percent().clamp(0.0, 100.0)
    }

    /// Usage of one volume; `(0, 0, 0)` when it cannot be found (e.g. unplugged).
    pub fn disk_usage(&mut self, volume_id: &str) -> DiskUsage {
        match self.source.volume_usage(volume_id) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    volume_id,
                    operation = "disk_usage",
                    "disk usage unavailable"
                );
                DiskUsage::default()
            }
        }
    }

    /// Send/receive rates since the previous call, plus cumulative totals.
    ///
    /// A counter reset shows up as a negative rate; it is passed through unclamped.
    #[instrument(skip(self), fields(operation = "network_rates"))]
    pub fn network_rates(&mut self) -> NetworkRates {
        let current = match self.source.network_counters() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "network counters read failed");
                return NetworkRates::default();
            }
        };
        let rates = match self.last_network {
            Some(prev) => current.rates_since(&prev, self.interval),
            // Baseline missing: report totals only.
            None => NetworkRates {
                total_sent: current.bytes_sent,
                total_recv: current.bytes_recv,
                ..NetworkRates::default()
            },
        };
        self.last_network = Some(current);
        rates
    }

    /// Read/write rates since the previous call; tracked separately from the network baseline.
    #[instrument(skip(self), fields(operation = "disk_io_rates"))]
    pub fn disk_io_rates(&mut self) -> DiskIoRates {
        let current = match self.source.disk_counters() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "disk counters read failed");
                return DiskIoRates::default();
            }
        };
        let rates = self
            .last_disk
            .map(|prev| current.rates_since(&prev, self.interval))
            .unwrap_or_default();
        self.last_disk = Some(current);
        rates
    }

    /// The most recent counter readings (zero for a counter never read successfully).
    pub fn last_snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            network: self.last_network.unwrap_or_default(),
            disk: self.last_disk.unwrap_or_default(),
        }
    }

    /// Time since boot. Boot epoch is fixed at construction and advanced by a monotonic clock.
    pub fn uptime(&self) -> Duration {
        self.uptime_at_start + self.started.elapsed()
    }

    /// One-shot hardware identity; `None` where the platform has no inventory provider.
    #[instrument(skip(self), fields(operation = "static_info"))]
    pub fn static_info(&self) -> Option<StaticSystemInfo> {
        match self.inventory.inventory() {
            Inventory::Available(info) => Some(info),
            Inventory::Unsupported(reason) => {
                tracing::info!(reason, "hardware inventory unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_average_of_cores() {
        assert_eq!(cpu_average(&[]), 0.0);
        assert_eq!(cpu_average(&[10.0, 20.0, 30.0, 40.0]), 25.0);
    }
}
