//! Transaction records as returned by a wallet or node.

use serde::{Deserialize, Serialize};

use crate::{Amount, BlockHash, Timestamp, TxHash};

/// Wallet classification of a transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Regular,
    /// Stake submission (ticket purchase).
    Ticket,
    /// Redeems a matured ticket by voting.
    Vote,
    /// Returns the funds of a missed or expired ticket.
    Revocation,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One entry of a wallet transaction listing.
///
/// A listing reports one entry per wallet-relevant input or output, so the
/// same `txid` may appear several times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransactionRecord {
    /// Transaction hash as reported by the wallet; parsed lazily.
    pub txid: String,
    #[serde(rename = "txtype", default)]
    pub tx_type: TxType,
}

impl RawTransactionRecord {
    pub fn new(txid: impl Into<String>, tx_type: TxType) -> Self {
        Self {
            txid: txid.into(),
            tx_type,
        }
    }

    pub fn is_vote(&self) -> bool {
        self.tx_type == TxType::Vote
    }
}

/// Reference to a specific output of a previous transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: TxHash,
    pub index: u32,
    /// Regular (0) or stake (1) transaction tree.
    pub tree: i8,
}

impl OutPoint {
    pub fn new(hash: TxHash, index: u32, tree: i8) -> Self {
        Self { hash, index, tree }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxInput {
    pub previous_outpoint: OutPoint,
    pub sequence: u32,
}

/// A decoded transaction prefix: its ordered inputs and the trailing
/// lock time and expiry.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TransactionBody {
    pub version: u16,
    pub inputs: Vec<TxInput>,
    pub lock_time: u32,
    pub expiry: u32,
}

impl TransactionBody {
    /// The outpoint spent by input `index`, if the transaction has that many inputs.
    pub fn spent_outpoint(&self, index: usize) -> Option<&OutPoint> {
        self.inputs.get(index).map(|input| &input.previous_outpoint)
    }
}

/// A transaction output annotated by the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerboseOutput {
    pub index: u32,
    pub value: Amount,
}

/// Block-context annotated transaction details.
///
/// `block_height` and `block_time` are `None` while the transaction is
/// unmined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerboseTransaction {
    pub txid: TxHash,
    pub block_hash: Option<BlockHash>,
    pub block_height: Option<i64>,
    pub block_time: Option<Timestamp>,
    pub outputs: Vec<VerboseOutput>,
}

impl VerboseTransaction {
    /// Value of the output with the given index.
    pub fn output_value(&self, index: u32) -> Option<Amount> {
        self.outputs
            .iter()
            .find(|out| out.index == index)
            .map(|out| out.value)
    }

    /// Height and time of the containing block, when mined.
    pub fn confirmed_at(&self) -> Option<(i64, Timestamp)> {
        match (self.block_height, self.block_time) {
            (Some(height), Some(time)) if height > 0 => Some((height, time)),
            _ => None,
        }
    }
}
