//! `WalletRpcClient` against a local HTTP server: retry budget, backoff,
//! credential rejection and JSON-RPC error classification.

use httpmock::prelude::*;
use std::time::{Duration, Instant};

use votetime_source::{RpcConfig, SourceError, TransactionSource, WalletRpcClient};
use votetime_types::BlockHash;

const BLOCK: &str = "000000000000000015e7ad4a7a5e8dbd4b6b0a5b8f49b0d03c1e64a4a4a8b2f1";

fn client_for(server: &MockServer, max_attempts: u32, retry_backoff_ms: u64) -> WalletRpcClient {
    let config = RpcConfig {
        host: Some(server.base_url()),
        notls: true,
        max_attempts,
        retry_backoff_ms,
        ..Default::default()
    };
    WalletRpcClient::new(&config).unwrap()
}

// ---------------------------------------------------------------------------
// Successful calls
// ---------------------------------------------------------------------------

#[tokio::test]
async fn block_hash_is_parsed_from_result() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200)
                .header("content-type", "application/json")
                .body(format!(r#"{{"result":"{BLOCK}","error":null,"id":1}}"#));
        })
        .await;

    let client = client_for(&server, 3, 1);
    let hash = client.get_block_hash(250_256).await.unwrap();
    assert_eq!(hash, BLOCK.parse::<BlockHash>().unwrap());
    assert_eq!(mock.calls_async().await, 1);
}

#[tokio::test]
async fn wallet_info_reports_node_connection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).body(
                r#"{"result":{"daemonconnected":true,"unlocked":false,"voting":true},"error":null,"id":1}"#,
            );
        })
        .await;

    let info = client_for(&server, 1, 1).wallet_info().await.unwrap();
    assert!(info.daemon_connected);
    assert!(!info.unlocked);
    assert!(info.voting);
}

// ---------------------------------------------------------------------------
// Transport failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unavailable_server_is_retried_up_to_the_budget() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(503).body("service unavailable");
        })
        .await;

    let err = client_for(&server, 3, 1).get_block_hash(10).await.unwrap_err();
    assert!(matches!(&err, SourceError::Transport(msg) if msg.contains("after 3 attempts")));
    assert!(err.is_fatal());
    assert_eq!(mock.calls_async().await, 3);
}

#[tokio::test]
async fn retries_back_off_linearly() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(502).body("bad gateway");
        })
        .await;

    // Two retries: waits of 1x and 2x the backoff.
    let started = Instant::now();
    let result = client_for(&server, 3, 40).get_block_hash(10).await;
    assert!(result.is_err());
    assert!(started.elapsed() >= Duration::from_millis(120));
}

#[tokio::test]
async fn rejected_credentials_are_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(401);
        })
        .await;

    let err = client_for(&server, 5, 1).wallet_info().await.unwrap_err();
    assert!(matches!(&err, SourceError::Transport(msg) if msg.contains("credentials")));
    assert_eq!(mock.calls_async().await, 1);
}

// ---------------------------------------------------------------------------
// JSON-RPC errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_body_on_http_500_is_classified_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(500).body(
                r#"{"result":null,"error":{"code":-5,"message":"No information available about transaction"},"id":1}"#,
            );
        })
        .await;

    let txid = "ab".repeat(32).parse().unwrap();
    let err = client_for(&server, 3, 1)
        .get_transaction_verbose(&txid)
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::NotFound(_)));
    assert!(!err.is_fatal());
    assert_eq!(mock.calls_async().await, 1);
}

#[tokio::test]
async fn height_past_tip_is_recoverable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).body(
                r#"{"result":null,"error":{"code":-1,"message":"Block number out of range"},"id":1}"#,
            );
        })
        .await;

    let err = client_for(&server, 3, 1)
        .get_block_hash(99_999_999)
        .await
        .unwrap_err();
    assert_eq!(err, SourceError::InvalidInput("Block number out of range".into()));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn generic_server_error_elsewhere_is_fatal() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).body(
                r#"{"result":null,"error":{"code":-1,"message":"internal error"},"id":1}"#,
            );
        })
        .await;

    let err = client_for(&server, 3, 1)
        .get_block_header(&BLOCK.parse().unwrap())
        .await
        .unwrap_err();
    assert!(err.is_fatal());
}
