// One rendered dashboard pass: raw numbers plus their display strings

use serde::Serialize;

use super::{DiskIoRates, DiskUsage, NetworkRates, StaticSystemInfo};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskLine {
    pub display_name: String,
    pub volume_id: String,
    pub usage: DiskUsage,
    /// "used / total", e.g. "120.50GB / 476.94GB"
    pub label: String,
}

/// Everything the presenter shows for a single tick.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFrame {
    /// Unix millis when the tick ran.
    pub timestamp: u64,
    pub uptime: String,
    pub ip: String,
    /// `None` when the platform has no hardware inventory.
    pub system: Option<StaticSystemInfo>,
    pub disks: Vec<DiskLine>,
    pub cpu_cores: Vec<f32>,
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub network: NetworkRates,
    pub disk_io: DiskIoRates,
    pub sent_speed: String,
    pub recv_speed: String,
    pub sent_total: String,
    pub recv_total: String,
    pub read_speed: String,
    pub write_speed: String,
}
