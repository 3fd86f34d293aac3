// Cumulative OS counters and the per-interval rates derived from them

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cumulative network byte counters (all interfaces, since boot).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// Cumulative disk I/O byte counters (whole disks, since boot).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskCounters {
    pub bytes_read: u64,
    pub bytes_written: u64,
}

/// All cumulative counters captured at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    pub network: NetworkCounters,
    pub disk: DiskCounters,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRates {
    pub sent_per_sec: f64,
    pub recv_per_sec: f64,
    pub total_sent: u64,
    pub total_recv: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskIoRates {
    pub read_per_sec: f64,
    pub write_per_sec: f64,
}

/// Bytes/sec between two readings of a cumulative counter.
///
/// A counter that went backwards (driver reset, wrap) yields a negative rate; it is not clamped.
pub fn counter_rate(previous: u64, current: u64, interval: Duration) -> f64 {
    let secs = interval.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    let delta = current as i128 - previous as i128;
    delta as f64 / secs
}

impl NetworkCounters {
    pub fn rates_since(&self, previous: &NetworkCounters, interval: Duration) -> NetworkRates {
        NetworkRates {
            sent_per_sec: counter_rate(previous.bytes_sent, self.bytes_sent, interval),
            recv_per_sec: counter_rate(previous.bytes_recv, self.bytes_recv, interval),
            total_sent: self.bytes_sent,
            total_recv: self.bytes_recv,
        }
    }
}

impl DiskCounters {
    pub fn rates_since(&self, previous: &DiskCounters, interval: Duration) -> DiskIoRates {
        DiskIoRates {
            read_per_sec: counter_rate(previous.bytes_read, self.bytes_read, interval),
            write_per_sec: counter_rate(previous.bytes_written, self.bytes_written, interval),
        }
    }
}
