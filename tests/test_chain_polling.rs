//! Integration tests for chain and event polling
//!
//! Tests cover:
//! - Current height and block hashes at a height
//! - Block events and swap filtering
//! - Transaction details and contract state lookups

mod common;

use alephium_swap_indexer::{filter_events, SWAP_EVENT_INDEX};
use common::{client_for, REGISTRY};
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_current_height_queries_main_chain_index() {
    let mut server = mockito::Server::new_async().await;
    let info = server
        .mock("GET", "/blockflow/chain-info")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("fromGroup".into(), "0".into()),
            Matcher::UrlEncoded("toGroup".into(), "0".into()),
        ]))
        .with_status(200)
        .with_body(json!({"currentHeight": 3_456_789}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(client.current_height().await.unwrap(), 3_456_789);
    info.assert_async().await;
}

#[tokio::test]
async fn test_block_hashes_at_height() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/blockflow/hashes")
        .match_query(Matcher::UrlEncoded("height".into(), "42".into()))
        .with_status(200)
        .with_body(json!({"headers": ["aa01", "bb02"]}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(
        client.block_hashes_at_height(42).await.unwrap(),
        vec!["aa01".to_string(), "bb02".to_string()]
    );
}

fn block_events_body() -> String {
    json!({
        "events": [
            {"txId": "t1", "contractAddress": REGISTRY, "eventIndex": 2, "fields": [{"type": "Address", "value": "1Dx"}]},
            {"txId": "t2", "contractAddress": REGISTRY, "eventIndex": 0, "fields": []},
            {"txId": "t3", "contractAddress": REGISTRY, "eventIndex": 2, "fields": [{"type": "U256", "value": "1000"}]}
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_events_in_block_and_swap_filter() {
    let mut server = mockito::Server::new_async().await;
    let events = server
        .mock("GET", "/events/block-hash/00abcd")
        .match_query(Matcher::UrlEncoded("group".into(), "0".into()))
        .with_status(200)
        .with_body(block_events_body())
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    let all = client.events_in_block("00abcd").await.unwrap();
    assert_eq!(all.len(), 3);

    let swaps = client.swap_events_in_block("00abcd").await.unwrap();
    let ids: Vec<_> = swaps.iter().map(|e| e.tx_id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t3"]);
    assert_eq!(filter_events(all, SWAP_EVENT_INDEX), swaps);
    events.assert_async().await;
}

#[tokio::test]
async fn test_transaction_details_from_backend() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/transactions/b9744b60")
        .with_status(200)
        .with_body(
            json!({
                "type": "Accepted",
                "hash": "b9744b60",
                "blockHash": "00abcd",
                "timestamp": 1_700_000_000_000u64,
                "inputs": [{"outputRef": {"hint": 1, "key": "k"}, "address": "1Dx", "attoAlphAmount": "1000", "tokens": []}],
                "outputs": [{"type": "AssetOutput", "hint": 2, "key": "k2", "attoAlphAmount": "900", "address": "1Dx",
                             "tokens": [{"id": "1a28", "amount": "5"}]}],
                "gasAmount": 20000,
                "gasPrice": "100000000000",
                "scriptExecutionOk": true,
                "coinbase": false
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let tx = client.transaction_details("b9744b60").await.unwrap();

    assert_eq!(tx.block_hash, "00abcd");
    assert!(tx.script_execution_ok);
    assert_eq!(tx.outputs[0].tokens[0].amount, "5");
    assert_eq!(tx.inputs[0].address.as_deref(), Some("1Dx"));
}

#[tokio::test]
async fn test_contract_state() {
    let mut server = mockito::Server::new_async().await;
    let path = format!("/contracts/{}/state", REGISTRY);
    server
        .mock("GET", path.as_str())
        .with_status(200)
        .with_body(
            json!({
                "address": REGISTRY,
                "bytecode": "0102",
                "codeHash": "ff",
                "initialStateHash": "ee",
                "immFields": [{"type": "ByteVec", "value": "00"}],
                "mutFields": [{"type": "U256", "value": "7"}, {"type": "Bool", "value": false}],
                "asset": {"address": REGISTRY, "attoAlphAmount": "1000000000000000000", "tokens": []}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let state = client.contract_state(REGISTRY).await.unwrap();

    assert_eq!(state.code_hash, "ff");
    assert_eq!(state.mut_fields.len(), 2);
    assert_eq!(state.mut_fields[0].as_str(), Some("7"));
}
