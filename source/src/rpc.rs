//! JSON-RPC client for a dcrwallet-compatible wallet server.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use votetime_types::{
    Amount, BlockHash, BlockHeader, RawTransactionRecord, Timestamp, TransactionBody, TxHash,
    VerboseOutput, VerboseTransaction,
};

use crate::{codec, RpcConfig, SourceError, TransactionSource};

/// Generic server error. For `getblockhash` it means the height is past the tip.
const RPC_OUT_OF_RANGE: i64 = -1;
/// "No information available about transaction" / invalid address or key.
const RPC_INVALID_ADDRESS_OR_KEY: i64 = -5;
const RPC_INVALID_PARAMETER: i64 = -8;
const RPC_DESERIALIZATION: i64 = -22;
const RPC_INVALID_PARAMS: i64 = -32602;

/// HTTP client for a wallet's JSON-RPC interface.
///
/// Wraps `reqwest::Client` with the endpoint URL and credentials and provides
/// typed methods for each RPC the analysis needs. Transport failures are
/// retried up to the configured attempt count before being reported.
pub struct WalletRpcClient {
    http: reqwest::Client,
    url: String,
    user: String,
    pass: String,
    max_attempts: u32,
    retry_backoff: Duration,
    next_id: AtomicU64,
}

/// Summary of the wallet's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletInfo {
    pub daemon_connected: bool,
    pub unlocked: bool,
    pub voting: bool,
}

/// Outcome of a single request attempt.
enum Failure {
    Retryable(String),
    Final(SourceError),
}

impl WalletRpcClient {
    /// Build a client from connection settings.
    ///
    /// Unless `notls` is set the certificate file is read and trusted as a
    /// root; a missing or unreadable certificate is a configuration error.
    pub fn new(config: &RpcConfig) -> Result<Self, SourceError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        if config.notls {
            tracing::info!(
                host = %config.host(),
                user = %config.user,
                "connecting to wallet RPC server (no TLS)"
            );
        } else {
            let pem = std::fs::read(&config.cert).map_err(|e| {
                SourceError::Config(format!(
                    "failed to read RPC cert file at {}: {e}",
                    config.cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                SourceError::Config(format!(
                    "invalid RPC certificate {}: {e}",
                    config.cert.display()
                ))
            })?;
            builder = builder.add_root_certificate(cert);
            tracing::info!(
                host = %config.host(),
                user = %config.user,
                cert = %config.cert.display(),
                "connecting to wallet RPC server"
            );
        }

        let http = builder
            .build()
            .map_err(|e| SourceError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: config.endpoint_url(),
            user: config.user.clone(),
            pass: config.pass.clone(),
            max_attempts: config.max_attempts.max(1),
            retry_backoff: config.retry_backoff(),
            next_id: AtomicU64::new(1),
        })
    }

    /// The configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the wallet's connection and voting state.
    pub async fn wallet_info(&self) -> Result<WalletInfo, SourceError> {
        let info: WalletInfoResult = self.rpc_call("walletinfo", json!([])).await?;
        Ok(WalletInfo {
            daemon_connected: info.daemon_connected,
            unlocked: info.unlocked,
            voting: info.voting,
        })
    }

    /// Call `method` and deserialize its `result`, retrying transport failures.
    async fn rpc_call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, SourceError> {
        let mut attempt = 1;
        let result = loop {
            match self.send_once(method, &params).await {
                Ok(result) => break result,
                Err(Failure::Retryable(msg)) if attempt < self.max_attempts => {
                    tracing::warn!(method, attempt, error = %msg, "wallet RPC call failed, retrying");
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                    attempt += 1;
                }
                Err(Failure::Retryable(msg)) => {
                    return Err(SourceError::Transport(format!(
                        "{method} failed after {attempt} attempts: {msg}"
                    )))
                }
                Err(Failure::Final(e)) => return Err(e),
            }
        };

        serde_json::from_value(result)
            .map_err(|e| SourceError::Decode(format!("invalid {method} response: {e}")))
    }

    async fn send_once(&self, method: &str, params: &Value) -> Result<Value, Failure> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "1.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::debug!(method, id, "wallet RPC request");

        let response = self
            .http
            .post(&self.url)
            .basic_auth(&self.user, Some(&self.pass))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Failure::Retryable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    Failure::Retryable(format!("connection failed: {e}"))
                } else {
                    Failure::Retryable(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Failure::Final(SourceError::Transport(
                "wallet rejected the RPC credentials".into(),
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Failure::Retryable(format!("failed to read response: {e}")))?;

        // RPC-level errors may arrive with a non-2xx status, so try the
        // envelope before looking at the status code.
        match serde_json::from_str::<RpcResponse>(&text) {
            Ok(envelope) => envelope.into_result(method).map_err(Failure::Final),
            Err(e) if status.is_success() => Err(Failure::Final(SourceError::Decode(format!(
                "invalid JSON-RPC envelope: {e}"
            )))),
            Err(_) => Err(Failure::Retryable(format!("wallet returned HTTP {status}"))),
        }
    }
}

#[async_trait]
impl TransactionSource for WalletRpcClient {
    async fn list_transactions(
        &self,
        account: &str,
        count: u32,
        from: u32,
    ) -> Result<Vec<RawTransactionRecord>, SourceError> {
        self.rpc_call("listtransactions", json!([account, count, from]))
            .await
    }

    async fn get_transaction(&self, txid: &TxHash) -> Result<TransactionBody, SourceError> {
        let raw: String = self
            .rpc_call("getrawtransaction", json!([txid.to_string(), 0]))
            .await?;
        Ok(codec::decode_transaction_hex(&raw)?)
    }

    async fn get_transaction_verbose(
        &self,
        txid: &TxHash,
    ) -> Result<VerboseTransaction, SourceError> {
        let result: VerboseTxResult = self
            .rpc_call("getrawtransaction", json!([txid.to_string(), 1]))
            .await?;
        result.try_into()
    }

    async fn get_block_hash(&self, height: i64) -> Result<BlockHash, SourceError> {
        let hash: String = self.rpc_call("getblockhash", json!([height])).await?;
        hash.parse()
            .map_err(|e| SourceError::Decode(format!("invalid getblockhash response: {e}")))
    }

    async fn get_block_header(&self, hash: &BlockHash) -> Result<BlockHeader, SourceError> {
        let result: BlockHeaderResult = self
            .rpc_call("getblockheader", json!([hash.to_string(), true]))
            .await?;
        result.try_into()
    }
}

// ── Wire types ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl RpcResponse {
    fn into_result(self, method: &str) -> Result<Value, SourceError> {
        match self.error {
            Some(err) => Err(classify_rpc_error(method, err.code, &err.message)),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// Map a JSON-RPC error code onto the source error taxonomy.
fn classify_rpc_error(method: &str, code: i64, message: &str) -> SourceError {
    match code {
        RPC_OUT_OF_RANGE if method == "getblockhash" => {
            SourceError::InvalidInput(message.to_string())
        }
        RPC_INVALID_ADDRESS_OR_KEY => SourceError::NotFound(message.to_string()),
        RPC_INVALID_PARAMETER | RPC_DESERIALIZATION | RPC_INVALID_PARAMS => {
            SourceError::InvalidInput(message.to_string())
        }
        _ => SourceError::Transport(format!("RPC error {code}: {message}")),
    }
}

#[derive(Debug, Deserialize)]
struct WalletInfoResult {
    #[serde(rename = "daemonconnected")]
    daemon_connected: bool,
    #[serde(default)]
    unlocked: bool,
    #[serde(default)]
    voting: bool,
}

#[derive(Debug, Deserialize)]
struct VerboseTxResult {
    txid: String,
    #[serde(default)]
    blockhash: Option<String>,
    #[serde(default)]
    blockheight: Option<i64>,
    #[serde(default)]
    blocktime: Option<i64>,
    #[serde(default)]
    vout: Vec<VoutResult>,
}

#[derive(Debug, Deserialize)]
struct VoutResult {
    value: f64,
    n: u32,
}

impl TryFrom<VerboseTxResult> for VerboseTransaction {
    type Error = SourceError;

    fn try_from(r: VerboseTxResult) -> Result<Self, Self::Error> {
        let decode = |what: &str, e: &dyn std::fmt::Display| {
            SourceError::Decode(format!("invalid {what} in transaction {}: {e}", r.txid))
        };

        let txid = r.txid.parse::<TxHash>().map_err(|e| decode("txid", &e))?;
        let block_hash = match r.blockhash.as_deref() {
            Some(s) if !s.is_empty() => Some(s.parse::<BlockHash>().map_err(|e| decode("blockhash", &e))?),
            _ => None,
        };
        let outputs = r
            .vout
            .iter()
            .map(|out| {
                Amount::from_coins(out.value)
                    .map(|value| VerboseOutput {
                        index: out.n,
                        value,
                    })
                    .map_err(|e| decode("output value", &e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(VerboseTransaction {
            txid,
            block_hash,
            block_height: r.blockheight,
            block_time: r.blocktime.map(Timestamp::new),
            outputs,
        })
    }
}

#[derive(Debug, Deserialize)]
struct BlockHeaderResult {
    hash: String,
    height: i64,
    time: i64,
}

impl TryFrom<BlockHeaderResult> for BlockHeader {
    type Error = SourceError;

    fn try_from(r: BlockHeaderResult) -> Result<Self, Self::Error> {
        let hash = r
            .hash
            .parse()
            .map_err(|e| SourceError::Decode(format!("invalid block header hash: {e}")))?;
        Ok(BlockHeader {
            hash,
            height: r.height,
            time: Timestamp::new(r.time),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "fd3b2a0a34f52dbbcbbbd9b4a3bc5f1c9fcbbd18bf3ee3a3e1d1a7ec7a6c6b10";
    const BLOCK: &str = "000000000000000015e7ad4a7a5e8dbd4b6b0a5b8f49b0d03c1e64a4a4a8b2f1";

    #[test]
    fn not_found_code_is_recoverable() {
        let err = classify_rpc_error("getrawtransaction", -5, "No information available about transaction");
        assert!(matches!(err, SourceError::NotFound(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn invalid_parameter_codes_are_recoverable() {
        for code in [-8, -22, -32602] {
            let err = classify_rpc_error("getrawtransaction", code, "bad");
            assert!(matches!(err, SourceError::InvalidInput(_)), "code {code}");
        }
    }

    #[test]
    fn other_codes_are_fatal() {
        let err = classify_rpc_error("getblockheader", -1, "chain not synced");
        assert!(err.is_fatal());
    }

    #[test]
    fn height_past_tip_is_recoverable() {
        let err = classify_rpc_error("getblockhash", -1, "Block number out of range");
        assert_eq!(err, SourceError::InvalidInput("Block number out of range".into()));
    }

    #[test]
    fn envelope_error_wins_over_result() {
        let envelope: RpcResponse = serde_json::from_str(
            r#"{"result":null,"error":{"code":-5,"message":"no tx"},"id":1}"#,
        )
        .unwrap();
        assert_eq!(
            envelope.into_result("getrawtransaction").unwrap_err(),
            SourceError::NotFound("no tx".into())
        );
    }

    #[test]
    fn envelope_result_is_returned() {
        let envelope: RpcResponse =
            serde_json::from_str(r#"{"result":"abc","error":null,"id":1}"#).unwrap();
        assert_eq!(envelope.into_result("getblockhash").unwrap(), json!("abc"));
    }

    #[test]
    fn verbose_result_converts() {
        let json = format!(
            r#"{{"hex":"00","txid":"{TXID}","blockhash":"{BLOCK}","blockheight":250000,
                "blocktime":1523000000,"confirmations":12,
                "vout":[{{"value":97.5,"n":0,"scriptPubKey":{{}}}},{{"value":0.0,"n":1}}]}}"#
        );
        let result: VerboseTxResult = serde_json::from_str(&json).unwrap();
        let tx = VerboseTransaction::try_from(result).unwrap();
        assert_eq!(tx.txid.to_string(), TXID);
        assert_eq!(tx.block_hash.unwrap().to_string(), BLOCK);
        assert_eq!(tx.confirmed_at(), Some((250_000, Timestamp::new(1_523_000_000))));
        assert_eq!(tx.output_value(0), Some(Amount::from_atoms(9_750_000_000)));
    }

    #[test]
    fn mempool_result_has_no_block() {
        let json = format!(r#"{{"txid":"{TXID}","vout":[]}}"#);
        let result: VerboseTxResult = serde_json::from_str(&json).unwrap();
        let tx = VerboseTransaction::try_from(result).unwrap();
        assert!(tx.block_hash.is_none());
        assert!(tx.confirmed_at().is_none());
    }

    #[test]
    fn verbose_result_with_bad_txid_is_decode_error() {
        let result: VerboseTxResult =
            serde_json::from_str(r#"{"txid":"nothex","vout":[]}"#).unwrap();
        assert!(matches!(
            VerboseTransaction::try_from(result),
            Err(SourceError::Decode(_))
        ));
    }

    #[test]
    fn block_header_result_converts() {
        let json = format!(r#"{{"hash":"{BLOCK}","height":250256,"time":1523080000,"version":5}}"#);
        let result: BlockHeaderResult = serde_json::from_str(&json).unwrap();
        let header = BlockHeader::try_from(result).unwrap();
        assert_eq!(header.height, 250_256);
        assert_eq!(header.time, Timestamp::new(1_523_080_000));
    }

    #[test]
    fn wallet_info_parses() {
        let info: WalletInfoResult =
            serde_json::from_str(r#"{"daemonconnected":true,"unlocked":false,"voting":true,"txfee":0.0001}"#)
                .unwrap();
        assert!(info.daemon_connected);
        assert!(info.voting);
    }

    #[test]
    fn client_without_tls_needs_no_cert() {
        let config = RpcConfig {
            notls: true,
            ..Default::default()
        };
        let client = WalletRpcClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:9110");
    }

    #[test]
    fn missing_cert_is_config_error() {
        let config = RpcConfig {
            cert: "/nonexistent/dcrwallet.cert".into(),
            ..Default::default()
        };
        let err = WalletRpcClient::new(&config).err().unwrap();
        assert!(matches!(err, SourceError::Config(_)));
        assert!(err.is_fatal());
    }
}
