//! Integration tests for token metadata resolution
//!
//! Tests cover:
//! - Native ALPH short-circuit (no network call)
//! - Symbol/name/decimals decoding from one multi-call
//! - All-or-nothing batch semantics on sub-call errors
//! - Result count mismatch between request and response

mod common;

use alephium_swap_indexer::types::NATIVE_TOKEN_ADDRESS;
use alephium_swap_indexer::{Asset, IndexerError};
use common::{client_for, AYIN_TOKEN};
use mockito::Matcher;
use serde_json::json;

fn metadata_calls(address: &str) -> serde_json::Value {
    json!({
        "calls": [
            {"group": 0, "address": address, "methodIndex": 0},
            {"group": 0, "address": address, "methodIndex": 1},
            {"group": 0, "address": address, "methodIndex": 2}
        ]
    })
}

#[tokio::test]
async fn test_native_token_needs_no_network_call() {
    let mut server = mockito::Server::new_async().await;
    let any = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let asset = client
        .resolve_token_metadata(NATIVE_TOKEN_ADDRESS, "alephium")
        .await
        .unwrap();

    assert_eq!(asset, Asset::native_alph());
    assert_eq!(asset.symbol, "ALPH");
    assert_eq!(asset.decimals, 18);
    any.assert_async().await;
}

#[tokio::test]
async fn test_resolve_ayin_metadata_from_multicall() {
    let mut server = mockito::Server::new_async().await;
    let multicall = server
        .mock("POST", "/contracts/multicall-contract")
        .match_body(Matcher::Json(metadata_calls(AYIN_TOKEN)))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [
                    {"type": "CallContractSucceeded", "returns": [{"type": "ByteVec", "value": "4159494e"}]},
                    {"type": "CallContractSucceeded", "returns": [{"type": "ByteVec", "value": "4179696e20546f6b656e"}]},
                    {"type": "CallContractSucceeded", "returns": [{"type": "U256", "value": "18"}]}
                ]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let asset = client.resolve_token_metadata(AYIN_TOKEN, "Alephium").await.unwrap();

    assert_eq!(
        asset,
        Asset {
            address: AYIN_TOKEN.to_string(),
            symbol: "AYIN".to_string(),
            name: "Ayin Token".to_string(),
            decimals: 18,
            blockchain: "Alephium".to_string(),
        }
    );
    multicall.assert_async().await;
}

#[tokio::test]
async fn test_failed_decimals_call_yields_no_asset() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/contracts/multicall-contract")
        .with_status(200)
        .with_body(
            json!({
                "results": [
                    {"returns": [{"type": "ByteVec", "value": "4159494e"}], "error": null},
                    {"returns": [{"type": "ByteVec", "value": "4179696e20546f6b656e"}], "error": null},
                    {"returns": [], "error": "VM execution error: InvalidMethodIndex"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.resolve_token_metadata(AYIN_TOKEN, "Alephium").await;

    assert_eq!(
        result,
        Err(IndexerError::ContractCall(
            "VM execution error: InvalidMethodIndex".to_string()
        ))
    );
}

#[tokio::test]
async fn test_malformed_symbol_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/contracts/multicall-contract")
        .with_status(200)
        .with_body(
            json!({
                "results": [
                    {"type": "CallContractSucceeded", "returns": [{"type": "ByteVec", "value": "41594"}]},
                    {"type": "CallContractSucceeded", "returns": [{"type": "ByteVec", "value": "41"}]},
                    {"type": "CallContractSucceeded", "returns": [{"type": "U256", "value": "18"}]}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.resolve_token_metadata(AYIN_TOKEN, "Alephium").await.unwrap_err();

    assert!(matches!(err, IndexerError::Decode(_)));
}

#[tokio::test]
async fn test_short_multicall_response_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/contracts/multicall-contract")
        .with_status(200)
        .with_body(
            json!({
                "results": [
                    {"type": "CallContractSucceeded", "returns": [{"type": "ByteVec", "value": "4159494e"}]}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.resolve_token_metadata(AYIN_TOKEN, "Alephium").await.unwrap_err();

    assert!(matches!(err, IndexerError::Decode(_)));
}
