//! Network identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ChainParams, TypesError};

/// Identifies which network the wallet is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    #[default]
    Mainnet,
    /// The public test network.
    Testnet,
    /// Local simulation network.
    Simnet,
}

impl NetworkId {
    /// Default wallet RPC port for this network.
    pub fn default_wallet_rpc_port(&self) -> u16 {
        self.params().wallet_rpc_port
    }

    /// Chain parameters for this network.
    pub fn params(&self) -> ChainParams {
        match self {
            Self::Mainnet => ChainParams::mainnet(),
            Self::Testnet => ChainParams::testnet(),
            Self::Simnet => ChainParams::simnet(),
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Simnet => "simnet",
        }
    }
}

impl FromStr for NetworkId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "live" => Ok(Self::Mainnet),
            "testnet" | "testnet3" | "test" => Ok(Self::Testnet),
            "simnet" | "sim" => Ok(Self::Simnet),
            other => Err(TypesError::UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
