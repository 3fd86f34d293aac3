// Model serialization tests (JSON camelCase for the frame output)

use deskpulse::models::*;

fn frame(system: Option<StaticSystemInfo>) -> DashboardFrame {
    DashboardFrame {
        timestamp: 12345,
        uptime: "0 days, 00:00:01".into(),
        ip: "IP | Fetching...".into(),
        system,
        disks: vec![DiskLine {
            display_name: "DISK0 - sda".into(),
            volume_id: "/".into(),
            usage: DiskUsage::from_space(2048, 1024),
            label: "1.00KB / 2.00KB".into(),
        }],
        cpu_cores: vec![1.0, 2.0],
        cpu_percent: 1.5,
        ram_percent: 50.0,
        network: NetworkRates::default(),
        disk_io: DiskIoRates::default(),
        sent_speed: "0.00B/s".into(),
        recv_speed: "0.00B/s".into(),
        sent_total: "0.00B".into(),
        recv_total: "0.00B".into(),
        read_speed: "0.00B/s".into(),
        write_speed: "0.00B/s".into(),
    }
}

#[test]
fn test_frame_serialization_camel_case() {
    let json = serde_json::to_string(&frame(None)).unwrap();
    for key in [
        "\"cpuCores\"",
        "\"cpuPercent\"",
        "\"ramPercent\"",
        "\"sentSpeed\"",
        "\"diskIo\"",
        "\"readPerSec\"",
        "\"sentPerSec\"",
        "\"totalSent\"",
        "\"volumeId\"",
        "\"displayName\"",
    ] {
        assert!(json.contains(key), "missing {key} in {json}");
    }
    assert!(json.contains("\"system\":null"));
}

#[test]
fn test_static_info_json_roundtrip() {
    let info = StaticSystemInfo {
        os_name: "Ubuntu 24.04.1 LTS".into(),
        os_version: "6.8.0".into(),
        cpu_model: "AMD Ryzen 7 7700X".into(),
        gpu_model: "amdgpu [1002:73BF]".into(),
        board_model: "ASUSTeK TUF GAMING B650-PLUS".into(),
        disks: vec![DiskVolume {
            display_name: "DISK0 - /dev/nvme0n1p2".into(),
            volume_id: "/".into(),
        }],
    };
    let json = serde_json::to_string(&info).unwrap();
    assert!(json.contains("\"boardModel\""));
    let back: StaticSystemInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back, info);

    let with_system = serde_json::to_string(&frame(Some(info))).unwrap();
    assert!(with_system.contains("\"osName\":\"Ubuntu 24.04.1 LTS\""));
}

#[test]
fn test_counter_snapshot_default_is_zero() {
    let snap = CounterSnapshot::default();
    assert_eq!(snap.network.bytes_sent, 0);
    assert_eq!(snap.disk.bytes_written, 0);
}
