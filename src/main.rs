use anyhow::Result;
use deskpulse::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout is the display surface; logs go to stderr.
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        sample_interval_ms = app_config.monitoring.sample_interval_ms,
        "starting"
    );

    let ip_rx = if app_config.external_ip.enabled {
        let lookup = netinfo::IpLookup::new(
            app_config.external_ip.url.clone(),
            Duration::from_secs(app_config.external_ip.timeout_secs),
        )?;
        Some(netinfo::spawn_lookup(lookup))
    } else {
        None
    };

    let sampler = sampler::Sampler::new(Duration::from_millis(
        app_config.monitoring.sample_interval_ms,
    ));
    let dashboard =
        dashboard::Dashboard::new(sampler, app_config.monitoring.max_history, ip_rx);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let handle = dashboard::spawn(
        dashboard,
        dashboard::DashboardConfig {
            sample_interval_ms: app_config.monitoring.sample_interval_ms,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
            format: app_config.display.format,
            clear_screen: app_config.display.clear_screen,
        },
        std::io::stdout(),
        shutdown_rx,
    );

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    handle.await?;
    Ok(())
}
