// OS telemetry provider backed by sysinfo (and /proc/diskstats on Linux).

use crate::models::{DiskCounters, DiskUsage, NetworkCounters};
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use sysinfo::{Disks, Networks, System};

use super::{SampleError, TelemetrySource, linux};

pub struct SysinfoSource {
    sys: System,
    disks: Disks,
    networks: Networks,
    /// Last per-core reading and when it was taken. sysinfo needs
    /// `MINIMUM_CPU_UPDATE_INTERVAL` between refreshes to compute usage.
    last_cpu_refresh: Instant,
    last_cpu_usage: Vec<f32>,
}

impl SysinfoSource {
    pub(crate) fn new() -> Self {
        let mut sys = System::new();
        // First refresh only primes per-core usage; real values need a second one later.
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        let last_cpu_usage = vec![0.0; sys.cpus().len()];
        Self {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            last_cpu_refresh: Instant::now(),
            last_cpu_usage,
        }
    }
}

impl TelemetrySource for SysinfoSource {
    fn cpu_per_core(&mut self) -> Vec<f32> {
        let now = Instant::now();
        if now.duration_since(self.last_cpu_refresh) >= sysinfo::MINIMUM_CPU_UPDATE_INTERVAL {
            self.sys.refresh_cpu_usage();
            self.last_cpu_usage = self
                .sys
                .cpus()
                .iter()
                .map(|c| c.cpu_usage().clamp(0.0, 100.0))
                .collect();
            self.last_cpu_refresh = now;
        }
        // Too soon after the previous refresh: reuse it rather than read a bogus 0%.
        self.last_cpu_usage.clone()
    }

    fn memory_percent(&mut self) -> f64 {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        let available = self.sys.available_memory();
        let used = total.saturating_sub(available);
        if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    fn volume_usage(&mut self, volume_id: &str) -> Result<DiskUsage, SampleError> {
        self.disks.refresh(true);
        self.disks
            .list()
            .iter()
            .find(|d| d.mount_point() == Path::new(volume_id))
            .map(|d| DiskUsage::from_space(d.total_space(), d.available_space()))
            .ok_or_else(|| SampleError::VolumeNotFound(volume_id.to_string()))
    }

    fn network_counters(&mut self) -> Result<NetworkCounters, SampleError> {
        self.networks.refresh(true);
        if self.networks.list().is_empty() {
            return Err(SampleError::CounterUnavailable("network interfaces"));
        }
        let counters = self
            .networks
            .list()
            .values()
            .fold(NetworkCounters::default(), |acc, data| NetworkCounters {
                bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                bytes_recv: acc.bytes_recv.saturating_add(data.total_received()),
            });
        Ok(counters)
    }

    fn disk_counters(&mut self) -> Result<DiskCounters, SampleError> {
        if let Some(totals) = linux::read_diskstats_totals() {
            return Ok(totals);
        }
        self.disks.refresh(true);
        if self.disks.list().is_empty() {
            return Err(SampleError::CounterUnavailable("disk io"));
        }
        let counters = self
            .disks
            .list()
            .iter()
            .fold(DiskCounters::default(), |acc, d| {
                let usage = d.usage();
                DiskCounters {
                    bytes_read: acc.bytes_read.saturating_add(usage.total_read_bytes),
                    bytes_written: acc.bytes_written.saturating_add(usage.total_written_bytes),
                }
            });
        Ok(counters)
    }

    fn boot_time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(System::boot_time())
    }
}
