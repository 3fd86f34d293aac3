// Presenter: one sampling-and-redraw pass per tick on a single task.
// The external IP lookup runs on its own task and hands its result back over a oneshot channel;
// only the tick loop ever writes presentation state.

use crate::config::OutputFormat;
use crate::format::{format_bytes, format_network_speed, format_uptime};
use crate::history::DashboardHistory;
use crate::models::{DashboardFrame, DiskLine, StaticSystemInfo};
use crate::netinfo::{FETCH_ERROR, IpReport};
use crate::render;
use crate::sampler::{Sampler, TelemetrySource, cpu_average};
use std::io::Write;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use crossterm::{QueueableCommand, cursor, terminal};
use tokio::time::{Duration, Instant, interval, interval_at};
use tracing::Instrument;

pub const IP_FETCHING: &str = "IP | Fetching...";
pub const IP_DISABLED: &str = "IP | Lookup disabled";

/// Presentation state owned by the tick loop.
pub struct Dashboard<S> {
    sampler: Sampler<S>,
    system: Option<StaticSystemInfo>,
    history: DashboardHistory,
    ip_label: String,
    ip_rx: Option<oneshot::Receiver<IpReport>>,
}

impl<S: TelemetrySource> Dashboard<S> {
    /// Queries static system info once. `ip_rx` is the pending external IP lookup, if enabled.
    pub fn new(
        sampler: Sampler<S>,
        max_history: usize,
        ip_rx: Option<oneshot::Receiver<IpReport>>,
    ) -> Self {
        let system = sampler.static_info();
        let ip_label = if ip_rx.is_some() {
            IP_FETCHING
        } else {
            IP_DISABLED
        };
        Self {
            sampler,
            system,
            history: DashboardHistory::new(max_history),
            ip_label: ip_label.to_string(),
            ip_rx,
        }
    }

    pub fn history(&self) -> &DashboardHistory {
        &self.history
    }

    pub fn ip_label(&self) -> &str {
        &self.ip_label
    }

    /// Applies a finished IP lookup without blocking.
    fn poll_ip(&mut self) {
        let Some(rx) = self.ip_rx.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(report) => {
                tracing::info!(label = %report.label(), "ip lookup finished");
                self.ip_label = report.label();
                self.ip_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                tracing::warn!("ip lookup task ended without a result");
                self.ip_label = format!("IP | {FETCH_ERROR}");
                self.ip_rx = None;
            }
        }
    }

    /// One full pass: sample everything, append to history, build the frame.
    pub fn tick(&mut self) -> DashboardFrame {
        self.poll_ip();

        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
                0
            });

        let uptime = format_uptime(self.sampler.uptime());

        let volumes = self
            .system
            .as_ref()
            .map(|s| s.disks.clone())
            .unwrap_or_default();
        let disks = volumes
            .into_iter()
            .map(|v| {
                let usage = self.sampler.disk_usage(&v.volume_id);
                DiskLine {
                    label: render::usage_label(usage.used, usage.total),
                    display_name: v.display_name,
                    volume_id: v.volume_id,
                    usage,
                }
            })
            .collect();

        let cpu_cores = self.sampler.cpu_usage();
        let network = self.sampler.network_rates();
        let disk_io = self.sampler.disk_io_rates();
        let cpu_percent = cpu_average(&cpu_cores);
        let ram_percent = self.sampler.ram_usage();

        self.history.record(&network, &disk_io, cpu_percent, ram_percent);

        DashboardFrame {
            timestamp,
            uptime,
            ip: self.ip_label.clone(),
            system: self.system.clone(),
            disks,
            cpu_cores,
            cpu_percent,
            ram_percent,
            sent_speed: format_network_speed(network.sent_per_sec),
            recv_speed: format_network_speed(network.recv_per_sec),
            sent_total: format_bytes(network.total_sent as f64),
            recv_total: format_bytes(network.total_recv as f64),
            read_speed: format_network_speed(disk_io.read_per_sec),
            write_speed: format_network_speed(disk_io.write_per_sec),
            network,
            disk_io,
        }
    }

    /// Renders a frame in the configured format.
    pub fn render(&self, frame: &DashboardFrame, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => render::render_text(frame, &self.history),
            OutputFormat::Json => render::render_json(frame).unwrap_or_else(|e| {
                tracing::warn!(error = %e, operation = "render_json", "frame serialization failed");
                String::new()
            }),
        }
    }
}

/// Tick loop timing and output config.
pub struct DashboardConfig {
    pub sample_interval_ms: u64,
    /// How often to log loop stats (real seconds).
    pub stats_log_interval_secs: u64,
    pub format: OutputFormat,
    pub clear_screen: bool,
}

/// Redraws the terminal from the top-left corner before a text frame.
fn queue_clear<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?
        .queue(cursor::MoveTo(0, 0))?;
    Ok(())
}

fn write_frame<W: Write>(out: &mut W, rendered: &str, clear: bool) -> std::io::Result<()> {
    if clear {
        queue_clear(out)?;
    }
    writeln!(out, "{rendered}")?;
    out.flush()
}

/// Spawns the tick loop. It stops after the current pass once `shutdown_rx` fires (or is dropped).
pub fn spawn<S, W>(
    dashboard: Dashboard<S>,
    config: DashboardConfig,
    out: W,
    shutdown_rx: oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()>
where
    S: TelemetrySource + Send + 'static,
    W: Write + Send + 'static,
{
    let span = tracing::span!(
        tracing::Level::DEBUG,
        "dashboard",
        sample_interval_ms = config.sample_interval_ms
    );
    tokio::spawn(run(dashboard, config, out, shutdown_rx).instrument(span))
}

async fn run<S: TelemetrySource, W: Write>(
    mut dashboard: Dashboard<S>,
    config: DashboardConfig,
    mut out: W,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let DashboardConfig {
        sample_interval_ms,
        stats_log_interval_secs,
        format,
        clear_screen,
    } = config;

    // First pass one full period after start, so rates and CPU usage cover a real interval.
    let period = Duration::from_millis(sample_interval_ms);
    let mut tick = interval_at(Instant::now() + period, period);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
    stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let clear = clear_screen && format == OutputFormat::Text;
    let mut ticks_total: u64 = 0;
    let mut write_failures_total: u64 = 0;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let frame = dashboard.tick();
                ticks_total += 1;
                let rendered = dashboard.render(&frame, format);
                if let Err(e) = write_frame(&mut out, &rendered, clear) {
                    write_failures_total += 1;
                    tracing::warn!(error = %e, operation = "write_frame", "frame write failed");
                }
            }
            _ = &mut shutdown_rx => {
                tracing::debug!("Dashboard shutting down");
                break;
            }
            _ = stats_log_tick.tick() => {
                tracing::info!(
                    ticks_total,
                    write_failures_total,
                    ip = %dashboard.ip_label(),
                    "dashboard stats"
                );
            }
        }
    }
}
