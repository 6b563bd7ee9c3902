//! EVM client against a mocked JSON-RPC node

#![allow(clippy::unwrap_used)]

use std::str::FromStr;

use alloy::primitives::{address, U256};
use bigdecimal::BigDecimal;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Match, Mock, MockServer, Request, Respond, ResponseTemplate};

use ipn_rs::{ClientError, EvmClient};

const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
const TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
const TX_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

// ============================================================================
// Helpers
// ============================================================================

/// JSON-RPC success response echoing the request id
fn rpc_result(result: Value) -> impl Respond {
    move |req: &Request| {
        let body: Value = serde_json::from_slice(&req.body).unwrap();
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": body["id"],
            "result": result.clone(),
        }))
    }
}

fn rpc_method(name: &str) -> impl Match {
    body_partial_json(json!({ "method": name }))
}

/// `eth_call` whose call-data starts with `selector`
fn eth_call_to(selector: &'static str) -> impl Match {
    move |req: &Request| {
        let body = String::from_utf8_lossy(&req.body);
        body.contains("\"eth_call\"") && body.contains(&format!("0x{}", selector))
    }
}

fn word(value: u64) -> Value {
    Value::String(format!("0x{:064x}", value))
}

async fn mock_node() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_chainId"))
        .respond_with(rpc_result(json!("0x7a69")))
        .mount(&server)
        .await;
    server
}

async fn mount_fee_and_nonce(server: &MockServer, nonce: &str) {
    Mock::given(method("POST"))
        .and(rpc_method("eth_gasPrice"))
        .respond_with(rpc_result(json!("0x3b9aca00")))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_getTransactionCount"))
        .respond_with(rpc_result(json!(nonce)))
        .mount(server)
        .await;
}

// ============================================================================
// Connection
// ============================================================================

#[tokio::test]
async fn connect_fails_when_probe_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = EvmClient::connect(&server.uri()).await;
    assert!(matches!(result, Err(ClientError::Connection(_))));
}

#[tokio::test]
async fn connect_fails_on_unreachable_endpoint() {
    let result = EvmClient::connect("http://127.0.0.1:9").await;
    assert!(matches!(result, Err(ref e) if e.is_connection()));
}

#[tokio::test]
async fn connected_client_reports_healthy() {
    let server = mock_node().await;
    let client = EvmClient::connect(&server.uri()).await.unwrap();
    assert!(client.connection().is_connected().await);
    assert_eq!(client.connection().chain_id().await.unwrap(), 31337);
}

// ============================================================================
// Balances
// ============================================================================

#[tokio::test]
async fn native_balance_scaled_and_raw() {
    let server = mock_node().await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_getBalance"))
        .respond_with(rpc_result(json!("0x14d1120d7b160000"))) // 1.5 ether
        .mount(&server)
        .await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();

    let scaled = client.get_native_balance(DEV_ADDRESS, false).await.unwrap();
    assert_eq!(scaled, BigDecimal::from_str("1.5").unwrap());

    let raw = client.get_native_balance(DEV_ADDRESS, true).await.unwrap();
    assert_eq!(raw, BigDecimal::from_str("1500000000000000000").unwrap());
}

#[tokio::test]
async fn native_balance_rejects_bad_address() {
    let server = mock_node().await;
    let client = EvmClient::connect(&server.uri()).await.unwrap();

    let err = client.get_native_balance("0x1234", false).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidAddress { .. }));
}

#[tokio::test]
async fn token_balance_scaled_by_decimals() {
    let server = mock_node().await;
    Mock::given(method("POST"))
        .and(eth_call_to("70a08231"))
        .respond_with(rpc_result(word(1_500_000)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(eth_call_to("313ce567"))
        .respond_with(rpc_result(word(6)))
        .expect(1)
        .mount(&server)
        .await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();
    let balance = client
        .get_token_balance(DEV_ADDRESS, TOKEN, false)
        .await
        .unwrap();

    assert_eq!(balance, BigDecimal::from_str("1.5").unwrap());
}

#[tokio::test]
async fn raw_token_balance_never_reads_decimals() {
    let server = mock_node().await;
    Mock::given(method("POST"))
        .and(eth_call_to("70a08231"))
        .respond_with(rpc_result(word(1_500_000)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(eth_call_to("313ce567"))
        .respond_with(rpc_result(word(6)))
        .expect(0)
        .mount(&server)
        .await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();
    let balance = client.get_token_balance(DEV_ADDRESS, TOKEN, true).await.unwrap();

    assert_eq!(balance, BigDecimal::from(1_500_000));
}

#[tokio::test]
async fn reverted_token_call_is_contract_error() {
    let server = mock_node().await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_call"))
        .respond_with(|req: &Request| {
            let body: Value = serde_json::from_slice(&req.body).unwrap();
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "error": { "code": 3, "message": "execution reverted" },
            }))
        })
        .mount(&server)
        .await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();
    let err = client
        .get_token_balance(DEV_ADDRESS, TOKEN, true)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Contract(_)));
}

// ============================================================================
// Transfers
// ============================================================================

#[tokio::test]
async fn builder_reads_fresh_nonce_each_time() {
    let server = mock_node().await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_getTransactionCount"))
        .respond_with(rpc_result(json!("0x5")))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_fee_and_nonce(&server, "0x6").await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();
    let from = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    let to = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
    let amount = BigDecimal::from_str("0.5").unwrap();

    let first = client.builder().native_transfer(from, to, &amount).await.unwrap();
    let second = client.builder().native_transfer(from, to, &amount).await.unwrap();

    assert_eq!(first.nonce, 5);
    assert_eq!(second.nonce, 6);
    assert_eq!(first.chain_id, 31337);
    assert_eq!(first.gas_price, 1_000_000_000);
    assert_eq!(first.gas_limit, 21_000);
    assert_eq!(first.value, U256::from(500_000_000_000_000_000u128));
}

#[tokio::test]
async fn token_transfer_targets_contract_with_token_gas() {
    let server = mock_node().await;
    mount_fee_and_nonce(&server, "0x0").await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();
    let token = client.token(TOKEN).unwrap();
    let from = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    let to = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    let tx = client
        .builder()
        .token_transfer(from, &token, to, U256::from(1_500_000u64))
        .await
        .unwrap();

    assert_eq!(tx.to, address!("5FbDB2315678afecb367f032d93F642f64180aa3"));
    assert_eq!(tx.value, U256::ZERO);
    assert_eq!(tx.gas_limit, 1_000_000);
    assert_eq!(&tx.input[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
}

#[tokio::test]
async fn send_native_returns_transaction_hash() {
    let server = mock_node().await;
    mount_fee_and_nonce(&server, "0x0").await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_sendRawTransaction"))
        .respond_with(rpc_result(json!(TX_HASH)))
        .expect(1)
        .mount(&server)
        .await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();
    let receipt = client
        .send_native(
            DEV_KEY,
            DEV_ADDRESS,
            RECIPIENT,
            &BigDecimal::from_str("0.01").unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(receipt.transaction_id, TX_HASH);
}

#[tokio::test]
async fn send_token_returns_transaction_hash() {
    let server = mock_node().await;
    mount_fee_and_nonce(&server, "0x2").await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_sendRawTransaction"))
        .respond_with(rpc_result(json!(TX_HASH)))
        .expect(1)
        .mount(&server)
        .await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();
    let receipt = client
        .send_token(DEV_KEY, DEV_ADDRESS, RECIPIENT, U256::from(10u64), TOKEN)
        .await
        .unwrap();

    assert_eq!(receipt.to_string(), TX_HASH);
}

#[tokio::test]
async fn malformed_key_never_touches_the_network() {
    let server = mock_node().await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_getTransactionCount"))
        .respond_with(rpc_result(json!("0x0")))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_sendRawTransaction"))
        .respond_with(rpc_result(json!(TX_HASH)))
        .expect(0)
        .mount(&server)
        .await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();
    let err = client
        .send_native(
            "0xnot-a-key",
            DEV_ADDRESS,
            RECIPIENT,
            &BigDecimal::from_str("1").unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidPrivateKey(_)));
}

#[tokio::test]
async fn key_for_other_account_is_not_broadcast() {
    let server = mock_node().await;
    mount_fee_and_nonce(&server, "0x0").await;
    Mock::given(method("POST"))
        .and(rpc_method("eth_sendRawTransaction"))
        .respond_with(rpc_result(json!(TX_HASH)))
        .expect(0)
        .mount(&server)
        .await;

    let client = EvmClient::connect(&server.uri()).await.unwrap();
    let err = client
        .send_native(
            DEV_KEY,
            RECIPIENT,
            DEV_ADDRESS,
            &BigDecimal::from_str("1").unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Signing(_)));
}

#[tokio::test]
async fn negative_native_amount_rejected() {
    let server = mock_node().await;
    let client = EvmClient::connect(&server.uri()).await.unwrap();

    let err = client
        .send_native(
            DEV_KEY,
            DEV_ADDRESS,
            RECIPIENT,
            &BigDecimal::from_str("-1").unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidAmount(_)));
}
