use tracing::{debug, error};

use crate::client::AlephiumClient;
use crate::codec::group_of_address;
use crate::error::{IndexerError, Result};
use crate::gateway::ApiRequest;
use crate::types::{CallContractRequest, CallContractResult, Calls, MulticallContractResponse};

/// Builds one read per method index against `address`, routed to the address's group.
pub fn method_calls(address: &str, method_indices: &[u32]) -> Result<Calls> {
    let group = group_of_address(address)?;
    let calls = method_indices
        .iter()
        .map(|&method_index| CallContractRequest {
            group,
            address: address.to_string(),
            method_index,
        })
        .collect();
    Ok(Calls { calls })
}

impl AlephiumClient {
    /// Executes a single contract read on the node.
    pub async fn call_contract(&self, call: &CallContractRequest) -> Result<CallContractResult> {
        let url = self.node_endpoint("/contracts/call-contract", &[])?;
        self.gateway.call(ApiRequest::post_json(url, call)?).await
    }

    /// Executes `calls` as one multi-call round trip.
    ///
    /// The returned results are positionally aligned with `calls.calls`; a response
    /// with a different number of results is rejected.
    pub async fn multicall(&self, calls: &Calls) -> Result<Vec<CallContractResult>> {
        if calls.calls.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.node_endpoint("/contracts/multicall-contract", &[])?;
        let response: MulticallContractResponse =
            self.gateway.call(ApiRequest::post_json(url, calls)?).await?;

        if response.results.len() != calls.calls.len() {
            error!(
                function = "multicall",
                requested = calls.calls.len(),
                returned = response.results.len(),
                "multicall result count mismatch"
            );
            return Err(IndexerError::decode(format!(
                "multicall returned {} results for {} calls",
                response.results.len(),
                calls.calls.len()
            )));
        }
        debug!(calls = calls.calls.len(), "multicall completed");
        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_calls_share_the_address_group() {
        let calls = method_calls("vyrkJHG49TXss6pGAz2dVxq5o7mBXNNXAV18nAeqVT1R", &[0, 1, 2]).unwrap();
        assert_eq!(calls.calls.len(), 3);
        for (i, call) in calls.calls.iter().enumerate() {
            assert_eq!(call.group, 0);
            assert_eq!(call.method_index, i as u32);
        }
    }

    #[test]
    fn method_calls_reject_bad_address() {
        assert!(matches!(
            method_calls("not-base58!", &[7]),
            Err(IndexerError::AddressFormat(_))
        ));
    }
}
