//! Fundamental types for vote wait-time analysis.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! transaction and block hashes, outpoints, coin amounts, timestamps, network
//! parameters, and the transaction/block records a chain source hands back.

pub mod amount;
pub mod block;
pub mod error;
pub mod hash;
pub mod network;
pub mod params;
pub mod time;
pub mod transaction;

pub use amount::Amount;
pub use block::{BlockHash, BlockHeader};
pub use error::TypesError;
pub use hash::TxHash;
pub use network::NetworkId;
pub use params::ChainParams;
pub use time::Timestamp;
pub use transaction::{
    OutPoint, RawTransactionRecord, TransactionBody, TxInput, TxType,
    VerboseOutput, VerboseTransaction,
};
