//! Per-network chain parameters consumed by the analysis.

use serde::{Deserialize, Serialize};

/// Chain parameters for one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Blocks after purchase before a ticket may vote.
    pub ticket_maturity: u32,

    /// Default wallet JSON-RPC listen port.
    pub wallet_rpc_port: u16,
}

impl ChainParams {
    pub const fn mainnet() -> Self {
        Self {
            ticket_maturity: 256,
            wallet_rpc_port: 9110,
        }
    }

    pub const fn testnet() -> Self {
        Self {
            ticket_maturity: 16,
            wallet_rpc_port: 19110,
        }
    }

    pub const fn simnet() -> Self {
        Self {
            ticket_maturity: 16,
            wallet_rpc_port: 19557,
        }
    }
}

/// Mainnet is the default.
impl Default for ChainParams {
    fn default() -> Self {
        Self::mainnet()
    }
}
