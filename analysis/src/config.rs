//! Analysis settings, passed explicitly into [`crate::run`].

use serde::{Deserialize, Serialize};

use votetime_types::{ChainParams, NetworkId};

/// What to scan and how to interpret it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Blocks after purchase before a ticket may vote.
    #[serde(default = "default_stake_maturity")]
    pub stake_maturity: u32,

    /// Wallet account filter; `"*"` matches every account.
    #[serde(default = "default_account")]
    pub account: String,

    /// Maximum number of listing entries to request.
    #[serde(default = "default_max_count")]
    pub max_count: u32,

    /// Index of the first listing entry to request.
    #[serde(default)]
    pub start_index: u32,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_stake_maturity() -> u32 {
    ChainParams::mainnet().ticket_maturity
}

fn default_account() -> String {
    "*".to_string()
}

fn default_max_count() -> u32 {
    9_999_999
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AnalysisConfig {
    /// Defaults with the stake maturity of `network`.
    pub fn for_network(network: NetworkId) -> Self {
        Self {
            stake_maturity: network.params().ticket_maturity,
            ..Default::default()
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stake_maturity: default_stake_maturity(),
            account: default_account(),
            max_count: default_max_count(),
            start_index: 0,
        }
    }
}
