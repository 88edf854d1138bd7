//! Tool configuration: the TOML file layout and its defaults.
//!
//! ```toml
//! network = "testnet"
//! log_level = "debug"
//! output = "json"
//!
//! [rpc]
//! host = "127.0.0.1:19110"
//! user = "alice"
//! cert = "/home/alice/.dcrwallet/rpc.cert"
//!
//! [analysis]
//! account = "default"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use votetime_analysis::AnalysisConfig;
use votetime_source::RpcConfig;
use votetime_types::NetworkId;
use votetime_utils::LogFormat;

/// How the report is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The `[analysis]` table. Unset fields fall back to the network preset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub stake_maturity: Option<u32>,
    pub account: Option<String>,
    pub max_count: Option<u32>,
    pub start_index: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub network: NetworkId,

    #[serde(default)]
    pub rpc: RpcConfig,

    #[serde(default)]
    pub analysis: AnalysisSection,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub output: OutputFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            network: NetworkId::default(),
            rpc: RpcConfig::default(),
            analysis: AnalysisSection::default(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            output: OutputFormat::default(),
        }
    }
}

impl ToolConfig {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// RPC settings, with a local host on the network's wallet port when no
    /// host was configured.
    pub fn rpc_config(&self) -> RpcConfig {
        let mut rpc = self.rpc.clone();
        if rpc.host.is_none() {
            rpc.host = Some(format!(
                "127.0.0.1:{}",
                self.network.default_wallet_rpc_port()
            ));
        }
        rpc
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::for_network(self.network);
        let section = &self.analysis;
        if let Some(maturity) = section.stake_maturity {
            config.stake_maturity = maturity;
        }
        if let Some(account) = &section.account {
            config.account = account.clone();
        }
        if let Some(count) = section.max_count {
            config.max_count = count;
        }
        if let Some(from) = section.start_index {
            config.start_index = from;
        }
        config
    }
}
