//! votetime: for every vote in a wallet, report how long after maturity its
//! ticket was called to vote.

mod config;

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use votetime_source::WalletRpcClient;
use votetime_types::NetworkId;
use votetime_utils::LogFormat;

use crate::config::{OutputFormat, ToolConfig};

#[derive(Parser)]
#[command(name = "votetime", version, about = "Ticket vote wait-time report for a Decred wallet")]
struct Cli {
    /// Wallet RPC server, as host:port.
    #[arg(long, env = "VOTETIME_HOST")]
    host: Option<String>,

    /// Wallet RPC user.
    #[arg(long, env = "VOTETIME_USER")]
    user: Option<String>,

    /// Wallet RPC password.
    #[arg(long, env = "VOTETIME_PASS", hide_env_values = true)]
    pass: Option<String>,

    /// Wallet RPC TLS certificate (PEM).
    #[arg(long, env = "VOTETIME_CERT")]
    cert: Option<PathBuf>,

    /// Connect without TLS.
    #[arg(long, env = "VOTETIME_NOTLS")]
    notls: bool,

    /// Network: "mainnet", "testnet" or "simnet".
    #[arg(long, env = "VOTETIME_NETWORK")]
    network: Option<NetworkId>,

    /// Blocks after purchase before a ticket may vote (defaults to the network's).
    #[arg(long, env = "VOTETIME_STAKE_MATURITY")]
    stake_maturity: Option<u32>,

    /// Wallet account to scan ("*" for all).
    #[arg(long, env = "VOTETIME_ACCOUNT")]
    account: Option<String>,

    /// Maximum number of listing entries to request.
    #[arg(long, env = "VOTETIME_COUNT")]
    count: Option<u32>,

    /// Index of the first listing entry to request.
    #[arg(long, env = "VOTETIME_FROM")]
    from: Option<u32>,

    /// Report format on stdout.
    #[arg(long, value_enum, env = "VOTETIME_OUTPUT")]
    output: Option<OutputFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VOTETIME_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VOTETIME_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "VOTETIME_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    fn merge_into(self, mut config: ToolConfig) -> ToolConfig {
        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(host) = self.host {
            config.rpc.host = Some(host);
        }
        if let Some(user) = self.user {
            config.rpc.user = user;
        }
        if let Some(pass) = self.pass {
            config.rpc.pass = pass;
        }
        if let Some(cert) = self.cert {
            config.rpc.cert = cert;
        }
        config.rpc.notls |= self.notls;

        let analysis = &mut config.analysis;
        analysis.stake_maturity = self.stake_maturity.or(analysis.stake_maturity);
        analysis.account = self.account.or(analysis.account.take());
        analysis.max_count = self.count.or(analysis.max_count);
        analysis.start_index = self.from.or(analysis.start_index);

        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => ToolConfig::from_toml_file(path)?,
        None => ToolConfig::default(),
    };
    let config_path = cli.config.clone();
    let config = cli.merge_into(file_config);

    votetime_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = config_path {
        tracing::info!(path = %path.display(), "loaded config");
    }

    let rpc_config = config.rpc_config();
    let analysis_config = config.analysis_config();
    tracing::info!(
        network = %config.network,
        host = %rpc_config.host(),
        user = %rpc_config.user,
        tls = !rpc_config.notls,
        stake_maturity = analysis_config.stake_maturity,
        "connecting to wallet RPC server"
    );

    let client = WalletRpcClient::new(&rpc_config).context("unable to set up wallet RPC client")?;
    let info = client.wallet_info().await.context("walletinfo failed")?;
    tracing::info!(
        daemon_connected = info.daemon_connected,
        unlocked = info.unlocked,
        voting = info.voting,
        "wallet connected to node"
    );
    if !info.daemon_connected {
        tracing::warn!("wallet is not connected to a node; chain lookups may fail");
    }

    let outcome = votetime_analysis::run(&client, &analysis_config)
        .await
        .context("vote analysis failed")?;
    if !outcome.skipped.is_empty() {
        tracing::warn!(skipped = outcome.skipped.len(), "some votes were left out of the report");
        for skipped in &outcome.skipped {
            tracing::debug!(vote = %skipped.txid, reason = %skipped.reason, "skipped vote");
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Text => outcome.report.write_text(&mut out)?,
        OutputFormat::Json => writeln!(out, "{}", outcome.report.to_json()?)?,
    }
    out.flush()?;

    Ok(())
}
