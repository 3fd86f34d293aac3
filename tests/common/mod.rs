// Shared test helpers: a scripted telemetry source and fixed inventories

#![allow(dead_code)]

use deskpulse::models::*;
use deskpulse::sampler::{
    HardwareInventory, Inventory, SampleError, Sampler, TelemetrySource, UnsupportedInventory,
};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, SystemTime};

/// Telemetry source that replays scripted counter readings.
/// `None` in a queue (or an exhausted queue) is a failed read.
pub struct FakeSource {
    pub cores: Vec<f32>,
    pub memory: f64,
    pub volumes: HashMap<String, DiskUsage>,
    pub network: VecDeque<Option<NetworkCounters>>,
    pub disk: VecDeque<Option<DiskCounters>>,
    pub boot_time: SystemTime,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            cores: vec![10.0, 30.0],
            memory: 42.0,
            volumes: HashMap::new(),
            network: VecDeque::new(),
            disk: VecDeque::new(),
            boot_time: SystemTime::now(),
        }
    }
}

impl FakeSource {
    pub fn with_network(readings: impl IntoIterator<Item = Option<NetworkCounters>>) -> Self {
        Self {
            network: readings.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl TelemetrySource for FakeSource {
    fn cpu_per_core(&mut self) -> Vec<f32> {
        self.cores.clone()
    }

    fn memory_percent(&mut self) -> f64 {
        self.memory
    }

    fn volume_usage(&mut self, volume_id: &str) -> Result<DiskUsage, SampleError> {
        self.volumes
            .get(volume_id)
            .copied()
            .ok_or_else(|| SampleError::VolumeNotFound(volume_id.to_string()))
    }

    fn network_counters(&mut self) -> Result<NetworkCounters, SampleError> {
        self.network
            .pop_front()
            .flatten()
            .ok_or(SampleError::CounterUnavailable("network"))
    }

    fn disk_counters(&mut self) -> Result<DiskCounters, SampleError> {
        self.disk
            .pop_front()
            .flatten()
            .ok_or(SampleError::CounterUnavailable("disk io"))
    }

    fn boot_time(&self) -> SystemTime {
        self.boot_time
    }
}

pub struct FixedInventory(pub StaticSystemInfo);

impl HardwareInventory for FixedInventory {
    fn inventory(&self) -> Inventory {
        Inventory::Available(self.0.clone())
    }
}

pub fn net(sent: u64, recv: u64) -> Option<NetworkCounters> {
    Some(NetworkCounters {
        bytes_sent: sent,
        bytes_recv: recv,
    })
}

pub fn disk(read: u64, written: u64) -> Option<DiskCounters> {
    Some(DiskCounters {
        bytes_read: read,
        bytes_written: written,
    })
}

/// One-second sampler with no hardware inventory.
pub fn sampler(source: FakeSource) -> Sampler<FakeSource> {
    Sampler::with_source(source, Box::new(UnsupportedInventory), Duration::from_secs(1))
}

pub fn test_system_info(volume_ids: &[&str]) -> StaticSystemInfo {
    StaticSystemInfo {
        os_name: "Test OS".into(),
        os_version: "1.0".into(),
        cpu_model: "Test CPU".into(),
        gpu_model: "Test GPU".into(),
        board_model: "Test Board".into(),
        disks: volume_ids
            .iter()
            .enumerate()
            .map(|(i, id)| DiskVolume {
                display_name: format!("DISK{i} - test{i}"),
                volume_id: id.to_string(),
            })
            .collect(),
    }
}
