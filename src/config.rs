use serde::Deserialize;

use crate::netinfo::DEFAULT_IP_ECHO_URL;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub monitoring: MonitoringConfig,
    pub external_ip: ExternalIpConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Tick period; rates are divided by this, not by measured wall time.
    pub sample_interval_ms: u64,
    /// Samples kept per chart before the oldest is dropped.
    pub max_history: usize,
    /// How often to log tick-loop stats at INFO level.
    pub stats_log_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            max_history: 100,
            stats_log_interval_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExternalIpConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for ExternalIpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_IP_ECHO_URL.into(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub format: OutputFormat,
    /// Redraw in place (text format only).
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            clear_screen: true,
        }
    }
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`). A missing default file means built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let explicit = std::env::var("CONFIG_FILE").ok();
        let path = explicit.clone().unwrap_or_else(|| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
                tracing::debug!(path = %path, "no config file; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!("config {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.max_history > 0,
            "monitoring.max_history must be > 0, got {}",
            self.monitoring.max_history
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        if self.external_ip.enabled {
            anyhow::ensure!(
                !self.external_ip.url.trim().is_empty(),
                "external_ip.url must be non-empty when external_ip.enabled"
            );
            anyhow::ensure!(
                self.external_ip.timeout_secs > 0,
                "external_ip.timeout_secs must be > 0, got {}",
                self.external_ip.timeout_secs
            );
        }
        Ok(())
    }
}
