//! JSON-RPC failover behaviour of the blockchain client.

use grc20_publisher::blockchain::{BlockchainClient, BlockchainConfig, BlockchainError, ChainRpc};
use serde_json::{json, Value};

mod common;
use common::{MockBackend, RecordedRequest};

/// Anvil chain id, hex encoded.
const CHAIN_ID_HEX: &str = "0x7a69";

fn rpc_method(req: &RecordedRequest) -> (String, Value) {
    let body: Value = serde_json::from_str(&req.body).unwrap_or(Value::Null);
    let method = body["method"].as_str().unwrap_or_default().to_string();
    (method, body["id"].clone())
}

/// A node that answers reads and rejects every broadcast as a duplicate.
async fn rejecting_node() -> MockBackend {
    common::start_programmable_backend(|req| {
        let (method, id) = rpc_method(req);
        let reply = match method.as_str() {
            "eth_chainId" => json!({ "jsonrpc": "2.0", "id": id, "result": CHAIN_ID_HEX }),
            "eth_gasPrice" => json!({ "jsonrpc": "2.0", "id": id, "result": "0x3b9aca00" }),
            _ => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32000, "message": "already known" }
            }),
        };
        (200, reply.to_string())
    })
    .await
}

fn broadcasts(node: &MockBackend) -> usize {
    node.requests()
        .iter()
        .filter(|req| rpc_method(req).0 == "eth_sendRawTransaction")
        .count()
}

fn config(rpc_url: String, failover: &MockBackend) -> BlockchainConfig {
    BlockchainConfig {
        rpc_url,
        failover_urls: vec![failover.url()],
        chain_id: 31337,
        rpc_timeout_secs: 2,
        ..BlockchainConfig::default()
    }
}

#[tokio::test]
async fn test_rejected_broadcast_is_not_resent_to_failover() {
    let primary = rejecting_node().await;
    let failover = rejecting_node().await;
    let client = BlockchainClient::new(config(primary.url(), &failover)).await.unwrap();

    let err = client.send_raw_transaction(&[0xc0]).await.unwrap_err();
    assert!(matches!(err, BlockchainError::Rpc(ref message) if message.contains("already known")));

    assert_eq!(broadcasts(&primary), 1);
    assert_eq!(broadcasts(&failover), 0);
}

#[tokio::test]
async fn test_unreachable_primary_fails_over_for_reads_only() {
    let failover = rejecting_node().await;
    // Nothing listens on the discard port
    let client = BlockchainClient::new(config("http://127.0.0.1:9".to_string(), &failover))
        .await
        .unwrap();

    assert_eq!(client.gas_price().await.unwrap(), 1_000_000_000);

    let err = client.send_raw_transaction(&[0xc0]).await.unwrap_err();
    assert!(matches!(err, BlockchainError::Rpc(_)));
    assert_eq!(broadcasts(&failover), 0);
}
