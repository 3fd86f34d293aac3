// Capability-gated hardware inventory: one implementation per platform.

use crate::models::{DiskVolume, StaticSystemInfo};
use sysinfo::{Disks, System};

use super::linux;

/// Result of a one-shot hardware enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inventory {
    Available(StaticSystemInfo),
    /// The platform has no inventory facility; the reason is for logs only.
    Unsupported(&'static str),
}

pub trait HardwareInventory: Send {
    fn inventory(&self) -> Inventory;
}

/// Inventory for platforms without a supported hardware query interface.
pub struct UnsupportedInventory;

impl HardwareInventory for UnsupportedInventory {
    fn inventory(&self) -> Inventory {
        Inventory::Unsupported("no hardware inventory provider for this platform")
    }
}

/// sysinfo plus /proc, /sys/class/dmi and /sys/class/drm.
pub struct LinuxInventory;

impl HardwareInventory for LinuxInventory {
    fn inventory(&self) -> Inventory {
        let mut sys = System::new();
        sys.refresh_cpu_all();

        let os_name = linux::read_os_pretty_name()
            .or_else(System::name)
            .unwrap_or_else(|| std::env::consts::OS.into());
        let os_version = System::kernel_version()
            .or_else(System::os_version)
            .unwrap_or_default();
        let cpu_model = linux::read_cpu_model()
            .or_else(|| {
                sys.cpus()
                    .first()
                    .map(|c| c.brand().trim().to_string())
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| "Unknown".into());
        let gpu_model = linux::read_gpu_model().unwrap_or_else(|| "Unknown".into());
        let board_model = match (linux::read_dmi("board_vendor"), linux::read_dmi("board_name")) {
            (Some(vendor), Some(name)) => format!("{vendor} {name}"),
            (None, Some(name)) => name,
            (Some(vendor), None) => vendor,
            (None, None) => "Unknown".into(),
        };

        Inventory::Available(StaticSystemInfo {
            os_name,
            os_version,
            cpu_model,
            gpu_model,
            board_model,
            disks: fixed_disks(&Disks::new_with_refreshed_list()),
        })
    }
}

/// Non-removable volumes, numbered in discovery order and keyed by mount point.
fn fixed_disks(disks: &Disks) -> Vec<DiskVolume> {
    let mut volumes: Vec<DiskVolume> = Vec::new();
    for disk in disks.list().iter().filter(|d| !d.is_removable()) {
        let volume_id = disk.mount_point().to_string_lossy().into_owned();
        if volumes.iter().any(|v| v.volume_id == volume_id) {
            continue;
        }
        volumes.push(DiskVolume {
            display_name: format!(
                "DISK{} - {}",
                volumes.len(),
                disk.name().to_string_lossy()
            ),
            volume_id,
        });
    }
    volumes
}

/// The inventory provider for the platform this binary was built for.
pub fn platform_inventory() -> Box<dyn HardwareInventory> {
    #[cfg(target_os = "linux")]
    {
        Box::new(LinuxInventory)
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(UnsupportedInventory)
    }
}
