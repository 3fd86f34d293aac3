// External (IP-echo service) and internal (default route) address discovery.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::instrument;

/// Shown instead of the address when the request itself failed (timeout, connect, HTTP status).
pub const FETCH_FAILED: &str = "Failed to fetch";
/// Shown instead of the address when the service answered with something unusable.
pub const FETCH_ERROR: &str = "Error";

pub const DEFAULT_IP_ECHO_URL: &str = "https://api.ipify.org?format=json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IpLookupError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed")]
    Connection,
    #[error("malformed response")]
    Malformed,
    #[error("request failed")]
    Other,
}

impl IpLookupError {
    fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            IpLookupError::Timeout
        } else if e.is_connect() {
            IpLookupError::Connection
        } else if e.is_decode() {
            IpLookupError::Malformed
        } else {
            IpLookupError::Other
        }
    }

    pub fn sentinel(&self) -> &'static str {
        match self {
            IpLookupError::Malformed => FETCH_ERROR,
            IpLookupError::Timeout | IpLookupError::Connection | IpLookupError::Other => {
                FETCH_FAILED
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpEcho {
    ip: Option<String>,
}

/// Public-address lookup against a JSON IP-echo endpoint (`{"ip": "..."}`). No retries.
#[derive(Debug, Clone)]
pub struct IpLookup {
    client: reqwest::Client,
    url: String,
}

impl IpLookup {
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// One GET; each call is an independent attempt.
    #[instrument(skip(self), fields(url = %self.url, operation = "fetch_external_ip"))]
    pub async fn fetch(&self) -> Result<String, IpLookupError> {
        let echo: IpEcho = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| IpLookupError::from_reqwest(&e))?
            .json()
            .await
            .map_err(|e| IpLookupError::from_reqwest(&e))?;
        echo.ip
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty())
            .ok_or(IpLookupError::Malformed)
    }

    /// The public address, or [`FETCH_FAILED`] / [`FETCH_ERROR`]. Never fails.
    pub async fn external_ip(&self) -> String {
        match self.fetch().await {
            Ok(ip) => ip,
            Err(e) => {
                tracing::warn!(error = %e, url = %self.url, "external ip lookup failed");
                e.sentinel().to_string()
            }
        }
    }
}

/// Local address of the default route. Connecting a UDP socket sends no packets.
pub fn internal_ip() -> IpAddr {
    let probe = || -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect("8.8.8.8:80")?;
        Ok(socket.local_addr()?.ip())
    };
    probe().unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

/// Result handed from the lookup task to the tick loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpReport {
    pub external: String,
    pub internal: IpAddr,
}

impl IpReport {
    pub fn label(&self) -> String {
        format!("IP | {} ({})", self.external, self.internal)
    }
}

/// Runs the lookup once on a background task and delivers the report over a oneshot channel.
pub fn spawn_lookup(lookup: IpLookup) -> oneshot::Receiver<IpReport> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let internal = internal_ip();
        let external = lookup.external_ip().await;
        if tx.send(IpReport { external, internal }).is_err() {
            tracing::debug!("ip report dropped; dashboard already stopped");
        }
    });
    rx
}
