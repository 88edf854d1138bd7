//! Transaction source capability.
//!
//! The analysis depends only on the [`TransactionSource`] trait. Two
//! implementations exist: [`WalletRpcClient`] talks JSON-RPC to a running
//! wallet, and the in-memory source in `votetime-nullables` backs the tests.

pub mod codec;
pub mod config;
pub mod error;
pub mod rpc;

pub use config::RpcConfig;
pub use error::SourceError;
pub use rpc::{WalletInfo, WalletRpcClient};

use async_trait::async_trait;
use votetime_types::{
    BlockHash, BlockHeader, RawTransactionRecord, TransactionBody, TxHash, VerboseTransaction,
};

/// Read access to wallet transactions and the chain they live on.
///
/// Implementations must keep "not found / invalid input" failures distinct
/// from transport failures; see [`SourceError::is_fatal`].
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// List wallet transactions for `account` (`"*"` for all), at most
    /// `count` entries starting at `from`. Entries may repeat a txid.
    async fn list_transactions(
        &self,
        account: &str,
        count: u32,
        from: u32,
    ) -> Result<Vec<RawTransactionRecord>, SourceError>;

    /// Full transaction body with its ordered inputs.
    async fn get_transaction(&self, txid: &TxHash) -> Result<TransactionBody, SourceError>;

    /// Block-annotated transaction detail.
    async fn get_transaction_verbose(
        &self,
        txid: &TxHash,
    ) -> Result<VerboseTransaction, SourceError>;

    /// Hash of the main-chain block at `height`.
    async fn get_block_hash(&self, height: i64) -> Result<BlockHash, SourceError>;

    async fn get_block_header(&self, hash: &BlockHash) -> Result<BlockHeader, SourceError>;
}
