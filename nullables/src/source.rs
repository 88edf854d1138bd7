//! Nullable transaction source: in-memory chain data for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use votetime_source::{SourceError, TransactionSource};
use votetime_types::{
    BlockHash, BlockHeader, RawTransactionRecord, TransactionBody, TxHash, VerboseTransaction,
};

/// One call made against a [`NullTransactionSource`]; also the key for
/// injected failures.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceCall {
    ListTransactions,
    GetTransaction(TxHash),
    GetTransactionVerbose(TxHash),
    GetBlockHash(i64),
    GetBlockHeader(BlockHash),
}

/// An in-memory transaction source for testing.
/// Thread-safe so it satisfies the `Send + Sync` bound of the trait.
///
/// Unknown lookups fail with [`SourceError::NotFound`]. The account filter
/// of `list_transactions` is ignored; `count` and `from` are honoured.
pub struct NullTransactionSource {
    listing: Mutex<Vec<RawTransactionRecord>>,
    bodies: Mutex<HashMap<TxHash, TransactionBody>>,
    verbose: Mutex<HashMap<TxHash, VerboseTransaction>>,
    block_hashes: Mutex<HashMap<i64, BlockHash>>,
    headers: Mutex<HashMap<BlockHash, BlockHeader>>,
    failures: Mutex<HashMap<SourceCall, SourceError>>,
    calls: Mutex<Vec<SourceCall>>,
}

impl NullTransactionSource {
    pub fn new() -> Self {
        Self {
            listing: Mutex::new(Vec::new()),
            bodies: Mutex::new(HashMap::new()),
            verbose: Mutex::new(HashMap::new()),
            block_hashes: Mutex::new(HashMap::new()),
            headers: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Append an entry to the wallet listing.
    pub fn push_listing(&self, record: RawTransactionRecord) {
        self.listing.lock().unwrap().push(record);
    }

    pub fn add_transaction(&self, txid: TxHash, body: TransactionBody) {
        self.bodies.lock().unwrap().insert(txid, body);
    }

    /// Add verbose detail, keyed by its own txid.
    pub fn add_verbose(&self, tx: VerboseTransaction) {
        self.verbose.lock().unwrap().insert(tx.txid, tx);
    }

    /// Add a main-chain block at `header.height`.
    pub fn add_block(&self, header: BlockHeader) {
        self.block_hashes
            .lock()
            .unwrap()
            .insert(header.height, header.hash);
        self.headers.lock().unwrap().insert(header.hash, header);
    }

    /// Make every future `call` fail with `error`.
    pub fn fail(&self, call: SourceCall, error: SourceError) {
        self.failures.lock().unwrap().insert(call, error);
    }

    /// All calls made so far, in order (for assertions).
    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: SourceCall) -> Result<(), SourceError> {
        let injected = self.failures.lock().unwrap().get(&call).cloned();
        self.calls.lock().unwrap().push(call);
        match injected {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for NullTransactionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionSource for NullTransactionSource {
    async fn list_transactions(
        &self,
        _account: &str,
        count: u32,
        from: u32,
    ) -> Result<Vec<RawTransactionRecord>, SourceError> {
        self.record(SourceCall::ListTransactions)?;
        Ok(self
            .listing
            .lock()
            .unwrap()
            .iter()
            .skip(from as usize)
            .take(count as usize)
            .cloned()
            .collect())
    }

    async fn get_transaction(&self, txid: &TxHash) -> Result<TransactionBody, SourceError> {
        self.record(SourceCall::GetTransaction(*txid))?;
        self.bodies
            .lock()
            .unwrap()
            .get(txid)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("transaction {txid}")))
    }

    async fn get_transaction_verbose(
        &self,
        txid: &TxHash,
    ) -> Result<VerboseTransaction, SourceError> {
        self.record(SourceCall::GetTransactionVerbose(*txid))?;
        self.verbose
            .lock()
            .unwrap()
            .get(txid)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("transaction {txid}")))
    }

    async fn get_block_hash(&self, height: i64) -> Result<BlockHash, SourceError> {
        self.record(SourceCall::GetBlockHash(height))?;
        self.block_hashes
            .lock()
            .unwrap()
            .get(&height)
            .copied()
            .ok_or_else(|| SourceError::InvalidInput(format!("block height {height} out of range")))
    }

    async fn get_block_header(&self, hash: &BlockHash) -> Result<BlockHeader, SourceError> {
        self.record(SourceCall::GetBlockHeader(*hash))?;
        self.headers
            .lock()
            .unwrap()
            .get(hash)
            .copied()
            .ok_or_else(|| SourceError::NotFound(format!("block {hash}")))
    }
}
