// Static hardware identity and per-volume usage models

use serde::{Deserialize, Serialize};

/// A local fixed disk volume discovered at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskVolume {
    /// e.g. "DISK0 - Samsung SSD 980"
    pub display_name: String,
    /// Stable key used to re-query usage every tick (the mount point).
    pub volume_id: String,
}

/// Static system identity; fetched once at startup and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticSystemInfo {
    pub os_name: String,
    pub os_version: String,
    pub cpu_model: String,
    pub gpu_model: String,
    pub board_model: String,
    pub disks: Vec<DiskVolume>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskUsage {
    pub used: u64,
    pub total: u64,
    pub percent: f64,
}

impl DiskUsage {
    pub fn from_space(total: u64, available: u64) -> Self {
        let used = total.saturating_sub(available);
        let percent = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Self {
            used,
            total,
            percent,
        }
    }
}
