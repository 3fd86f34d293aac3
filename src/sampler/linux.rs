// Linux-specific helpers: /proc, /etc/os-release, DMI, DRM, diskstats.

use crate::models::DiskCounters;

/// /proc/diskstats always counts 512-byte sectors regardless of the device's block size.
const DISKSTATS_SECTOR_SIZE: u64 = 512;

/// Read first "model name" from /proc/cpuinfo. Prefer over sysinfo when it returns "cpu0" etc.
pub(super) fn read_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty() && *s != "cpu0")?;
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Distro name from /etc/os-release: PRETTY_NAME, falling back to NAME.
pub(super) fn read_os_pretty_name() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/etc/os-release").ok()?;
        parse_os_release(&content)
    }
    #[cfg(not(target_os = "linux"))]
    None
}

pub(super) fn parse_os_release(content: &str) -> Option<String> {
    let value = |key: &str| {
        content.lines().find_map(|line| {
            let v = line.strip_prefix(key)?.trim().trim_matches('"');
            (!v.is_empty()).then(|| v.to_string())
        })
    };
    value("PRETTY_NAME=").or_else(|| value("NAME="))
}

/// Read a DMI attribute, e.g. `board_name` or `board_vendor`.
pub(super) fn read_dmi(field: &str) -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let v = std::fs::read_to_string(format!("/sys/class/dmi/id/{field}")).ok()?;
        let v = v.trim();
        if v.is_empty() {
            return None;
        }
        Some(v.to_string())
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = field;
        None
    }
}

/// First DRM card's kernel driver and PCI id, e.g. "amdgpu [1002:73BF]".
pub(super) fn read_gpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let mut cards: Vec<_> = std::fs::read_dir("/sys/class/drm")
            .ok()?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with("card") && !n.contains('-'))
            .collect();
        cards.sort();
        for card in cards {
            let path = format!("/sys/class/drm/{card}/device/uevent");
            if let Ok(content) = std::fs::read_to_string(&path)
                && let Some(model) = parse_drm_uevent(&content)
            {
                return Some(model);
            }
        }
    }
    None
}

pub(super) fn parse_drm_uevent(content: &str) -> Option<String> {
    let field = |key: &str| {
        content
            .lines()
            .find_map(|l| l.strip_prefix(key).map(|v| v.trim().to_string()))
            .filter(|v| !v.is_empty())
    };
    match (field("DRIVER="), field("PCI_ID=")) {
        (Some(driver), Some(id)) => Some(format!("{driver} [{id}]")),
        (Some(driver), None) => Some(driver),
        (None, Some(id)) => Some(format!("[{id}]")),
        (None, None) => None,
    }
}

/// Cumulative bytes read/written across whole disks, from /proc/diskstats.
pub(super) fn read_diskstats_totals() -> Option<DiskCounters> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/diskstats").ok()?;
        Some(parse_diskstats(&content, |name| {
            std::path::Path::new("/sys/block").join(name).exists()
        }))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Sum sectors read (field 6) and written (field 10) for whole-disk rows.
///
/// Partitions are skipped via `is_whole_disk`; loop/ram/zram and device-mapper rows are
/// skipped because their traffic is either virtual or already counted on the backing disk.
pub(super) fn parse_diskstats(content: &str, is_whole_disk: impl Fn(&str) -> bool) -> DiskCounters {
    let mut totals = DiskCounters::default();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 {
            continue;
        }
        let name = fields[2];
        if ["loop", "ram", "zram", "dm-"]
            .iter()
            .any(|p| name.starts_with(p))
            || !is_whole_disk(name)
        {
            continue;
        }
        let (Ok(read), Ok(written)) = (fields[5].parse::<u64>(), fields[9].parse::<u64>()) else {
            continue;
        };
        totals.bytes_read = totals
            .bytes_read
            .saturating_add(read.saturating_mul(DISKSTATS_SECTOR_SIZE));
        totals.bytes_written = totals
            .bytes_written
            .saturating_add(written.saturating_mul(DISKSTATS_SECTOR_SIZE));
    }
    totals
}
