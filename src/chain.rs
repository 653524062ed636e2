//! # Chain and Event Polling
//!
//! Stateless reads used to follow the chain after discovery: current height,
//! block hashes at a height, events in a block and transaction details.
//! Tracking the last seen height and any retry policy is up to the caller.

use tracing::error;

use crate::client::AlephiumClient;
use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::types::{
    BlockEventsResponse, BlockHashesResponse, ChainInfoResponse, ContractEvent, ContractStateResponse,
    TransactionDetailsResponse,
};

/// Event index emitted by Ayin pools on a swap.
pub const SWAP_EVENT_INDEX: i32 = 2;

/// Keeps the events tagged `event_index`, preserving their order.
pub fn filter_events(events: Vec<ContractEvent>, event_index: i32) -> Vec<ContractEvent> {
    events
        .into_iter()
        .filter(|event| event.event_index == event_index)
        .collect()
}

impl AlephiumClient {
    fn chain_index(&self) -> [(&'static str, String); 2] {
        [
            ("fromGroup", self.settings.chain_from_group.to_string()),
            ("toGroup", self.settings.chain_to_group.to_string()),
        ]
    }

    /// Current height of the configured chain index.
    pub async fn current_height(&self) -> Result<u64> {
        let url = self.node_endpoint("/blockflow/chain-info", &self.chain_index())?;
        let response: ChainInfoResponse = self.gateway.call(ApiRequest::get(url)).await.map_err(|e| {
            error!(function = "current_height", error = %e, "failed to callApi");
            e
        })?;
        Ok(response.current_height)
    }

    /// Hashes of every block at `height`; more than one when the chain forked.
    pub async fn block_hashes_at_height(&self, height: u64) -> Result<Vec<String>> {
        let [from, to] = self.chain_index();
        let url = self.node_endpoint("/blockflow/hashes", &[from, to, ("height", height.to_string())])?;
        let response: BlockHashesResponse = self.gateway.call(ApiRequest::get(url)).await.map_err(|e| {
            error!(function = "block_hashes_at_height", height, error = %e, "failed to callApi");
            e
        })?;
        Ok(response.headers)
    }

    pub async fn events_in_block(&self, block_hash: &str) -> Result<Vec<ContractEvent>> {
        let url = self.node_endpoint(
            &format!("/events/block-hash/{}", block_hash),
            &[("group", self.settings.events_group.to_string())],
        )?;
        let response: BlockEventsResponse = self.gateway.call(ApiRequest::get(url)).await.map_err(|e| {
            error!(function = "events_in_block", block_hash = %block_hash, error = %e, "failed to callApi");
            e
        })?;
        Ok(response.events)
    }

    pub async fn swap_events_in_block(&self, block_hash: &str) -> Result<Vec<ContractEvent>> {
        let events = self.events_in_block(block_hash).await?;
        Ok(filter_events(events, SWAP_EVENT_INDEX))
    }

    pub async fn transaction_details(&self, tx_hash: &str) -> Result<TransactionDetailsResponse> {
        let url = self.backend_endpoint(&format!("/transactions/{}", tx_hash), &[])?;
        self.gateway.call(ApiRequest::get(url)).await.map_err(|e| {
            error!(function = "transaction_details", tx_hash = %tx_hash, error = %e, "failed to callApi");
            e
        })
    }

    pub async fn contract_state(&self, address: &str) -> Result<ContractStateResponse> {
        let url = self.node_endpoint(&format!("/contracts/{}/state", address), &[])?;
        self.gateway.call(ApiRequest::get(url)).await.map_err(|e| {
            error!(function = "contract_state", address = %address, error = %e, "failed to callApi");
            e
        })
    }
}
