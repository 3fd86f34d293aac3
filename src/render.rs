// Terminal rendering of a dashboard frame: text panels with bar meters and sparklines, or JSON.

use std::fmt::Write as _;

use crate::format::{format_bytes, format_percent};
use crate::history::{DashboardHistory, History};
use crate::models::DashboardFrame;
use crate::version;

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const BAR_WIDTH: usize = 20;

/// Horizontal meter for a percentage, e.g. `[#####...............]`.
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    s.extend(std::iter::repeat_n('#', filled));
    s.extend(std::iter::repeat_n('.', width - filled));
    s.push(']');
    s
}

/// One block per sample scaled against `ceiling`; values at or below zero get the lowest block.
pub fn sparkline(history: &History, ceiling: f64) -> String {
    history
        .iter()
        .map(|v| {
            if ceiling <= 0.0 || v <= 0.0 {
                return SPARKS[0];
            }
            let idx = ((v / ceiling) * (SPARKS.len() - 1) as f64).round() as usize;
            SPARKS[idx.min(SPARKS.len() - 1)]
        })
        .collect()
}

/// Rate charts auto-scale to the busiest sample in the window.
fn rate_sparkline(history: &History) -> String {
    sparkline(history, history.max())
}

pub fn render_text(frame: &DashboardFrame, history: &DashboardHistory) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(&mut out, frame, history);
    out
}

fn write_text(
    out: &mut String,
    frame: &DashboardFrame,
    history: &DashboardHistory,
) -> std::fmt::Result {
    writeln!(out, "{} {}", version::NAME, version::VERSION)?;

    writeln!(out, "== System Information ==")?;
    match &frame.system {
        Some(info) => {
            writeln!(out, "OS    | {} {}", info.os_name, info.os_version)?;
            writeln!(out, "CPU   | {}", info.cpu_model)?;
            writeln!(out, "GPU   | {}", info.gpu_model)?;
            writeln!(out, "BOARD | {}", info.board_model)?;
        }
        None => writeln!(out, "System information unavailable")?,
    }

    writeln!(out, "== Uptime ==")?;
    writeln!(out, "{}", frame.uptime)?;

    if !frame.disks.is_empty() {
        writeln!(out, "== Disk Usage ==")?;
        for disk in &frame.disks {
            writeln!(out, "{} ({})", disk.display_name, disk.volume_id)?;
            writeln!(
                out,
                "  {} {:>4}  {}",
                bar(disk.usage.percent, BAR_WIDTH),
                format_percent(disk.usage.percent),
                disk.label
            )?;
        }
    }

    writeln!(out, "== CPU Core Usage ==")?;
    for (i, core) in frame.cpu_cores.iter().enumerate() {
        let core = *core as f64;
        writeln!(
            out,
            "  cpu{:<3} {} {:>4}",
            i,
            bar(core, BAR_WIDTH),
            format_percent(core)
        )?;
    }

    writeln!(out, "== Disk I/O ==")?;
    writeln!(
        out,
        "  READ  {:>12}  {}",
        frame.read_speed,
        rate_sparkline(&history.disk_read)
    )?;
    writeln!(
        out,
        "  WRITE {:>12}  {}",
        frame.write_speed,
        rate_sparkline(&history.disk_write)
    )?;

    writeln!(out, "== CPU & Memory Usage ==")?;
    writeln!(
        out,
        "  CPU {:>4}  {}",
        format_percent(frame.cpu_percent),
        sparkline(&history.cpu, 100.0)
    )?;
    writeln!(
        out,
        "  RAM {:>4}  {}",
        format_percent(frame.ram_percent),
        sparkline(&history.ram, 100.0)
    )?;

    writeln!(out, "== Network Usage ==")?;
    writeln!(out, "  {}", frame.ip)?;
    writeln!(
        out,
        "  ↑ {:>12} {:>10}  {}",
        frame.sent_speed,
        frame.sent_total,
        rate_sparkline(&history.sent)
    )?;
    writeln!(
        out,
        "  ↓ {:>12} {:>10}  {}",
        frame.recv_speed,
        frame.recv_total,
        rate_sparkline(&history.received)
    )?;
    Ok(())
}

pub fn render_json(frame: &DashboardFrame) -> serde_json::Result<String> {
    serde_json::to_string(frame)
}

/// `used / total` label for a disk line.
pub fn usage_label(used: u64, total: u64) -> String {
    format!(
        "{} / {}",
        format_bytes(used as f64),
        format_bytes(total as f64)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.0, 4), "[....]");
        assert_eq!(bar(50.0, 4), "[##..]");
        assert_eq!(bar(100.0, 4), "[####]");
        assert_eq!(bar(250.0, 4), "[####]");
    }

    #[test]
    fn sparkline_scales_to_ceiling() {
        let mut h = History::new(4);
        for v in [0.0, 50.0, 100.0, -10.0] {
            h.push(v);
        }
        assert_eq!(sparkline(&h, 100.0), "▁▅█▁");
    }

    #[test]
    fn sparkline_with_zero_ceiling_is_flat() {
        let mut h = History::new(2);
        h.push(0.0);
        h.push(0.0);
        assert_eq!(sparkline(&h, 0.0), "▁▁");
    }

    #[test]
    fn usage_label_formats_both_sides() {
        assert_eq!(usage_label(1024, 1024 * 1024), "1.00KB / 1.00MB");
    }
}
