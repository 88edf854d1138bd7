//! Wallet RPC connection settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How to reach the wallet's JSON-RPC server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RpcConfig {
    /// `host:port`, optionally prefixed with `http://` or `https://`.
    /// Unset means the local mainnet wallet; callers that know the network
    /// fill it in before connecting.
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub pass: String,

    /// PEM certificate of the wallet's TLS listener.
    #[serde(default = "default_cert")]
    pub cert: PathBuf,

    /// Connect over plain HTTP.
    #[serde(default)]
    pub notls: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Attempts per call before a transport failure is reported.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry; later retries wait proportionally longer.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

/// Wallet RPC address used when no host is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1:9110";

// ── Serde default helpers ──────────────────────────────────────────────

fn default_user() -> String {
    "dcrwallet".to_string()
}

fn default_cert() -> PathBuf {
    PathBuf::from("dcrwallet.cert")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RpcConfig {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Full URL of the JSON-RPC endpoint.
    pub fn endpoint_url(&self) -> String {
        let host = self.host();
        if host.starts_with("http://") || host.starts_with("https://") {
            return host.to_string();
        }
        let scheme = if self.notls { "http" } else { "https" };
        format!("{scheme}://{host}")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: None,
            user: default_user(),
            pass: String::new(),
            cert: default_cert(),
            notls: false,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}
