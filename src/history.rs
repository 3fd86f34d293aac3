// Fixed-capacity rolling history feeding the dashboard charts.

use serde::Serialize;
use std::collections::VecDeque;

use crate::models::{DiskIoRates, NetworkRates};

/// FIFO buffer that holds at most `capacity` samples; the oldest is evicted first.
#[derive(Debug, Clone, Serialize)]
pub struct History {
    capacity: usize,
    samples: VecDeque<f64>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append, then drop exactly one sample from the front if over capacity.
    pub fn push(&mut self, sample: f64) {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Largest sample, or 0 for an empty buffer.
    pub fn max(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }
}

/// Per-metric histories for one dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardHistory {
    pub sent: History,
    pub received: History,
    pub disk_read: History,
    pub disk_write: History,
    pub cpu: History,
    pub ram: History,
}

impl DashboardHistory {
    pub fn new(max_history: usize) -> Self {
        Self {
            sent: History::new(max_history),
            received: History::new(max_history),
            disk_read: History::new(max_history),
            disk_write: History::new(max_history),
            cpu: History::new(max_history),
            ram: History::new(max_history),
        }
    }

    pub fn record(
        &mut self,
        network: &NetworkRates,
        disk_io: &DiskIoRates,
        cpu_percent: f64,
        ram_percent: f64,
    ) {
        self.sent.push(network.sent_per_sec);
        self.received.push(network.recv_per_sec);
        self.disk_read.push(disk_io.read_per_sec);
        self.disk_write.push(disk_io.write_per_sec);
        self.cpu.push(cpu_percent);
        self.ram.push(ram_percent);
    }
}
