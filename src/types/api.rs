//! Request and response records for the Alephium node and backend REST APIs.

use serde::{Deserialize, Serialize};

/// A single contract read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContractRequest {
    pub group: u8,
    pub address: String,
    pub method_index: u32,
}

/// Ordered batch of reads sent as one multi-call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calls {
    pub calls: Vec<CallContractRequest>,
}

/// Typed value returned by a contract method or carried in an event field.
///
/// `ByteVec`, `U256`, `I256` and `Address` values arrive as strings, `Bool` as a JSON bool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Val {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
}

impl Val {
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Outcome of one contract call: the return values, or the error string the node reported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCallContractResult")]
pub enum CallContractResult {
    Succeeded { returns: Vec<Val> },
    Failed { error: String },
}

impl CallContractResult {
    /// Collapses the result into its return values, surfacing the node's error string.
    pub fn into_returns(self) -> Result<Vec<Val>, String> {
        match self {
            CallContractResult::Succeeded { returns } => Ok(returns),
            CallContractResult::Failed { error } => Err(error),
        }
    }
}

// Nodes emit either `{"type":"CallContractFailed","error":..}` or a nullable `error` next to
// `returns`; any error string wins.
#[derive(Deserialize)]
struct RawCallContractResult {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    returns: Option<Vec<Val>>,
    #[serde(default)]
    error: Option<String>,
}

impl From<RawCallContractResult> for CallContractResult {
    fn from(raw: RawCallContractResult) -> Self {
        match (raw.error, raw.kind.as_deref()) {
            (Some(error), _) => CallContractResult::Failed { error },
            (None, Some("CallContractFailed")) => CallContractResult::Failed {
                error: "call failed without an error message".to_string(),
            },
            (None, _) => CallContractResult::Succeeded {
                returns: raw.returns.unwrap_or_default(),
            },
        }
    }
}

/// Per-call results, positionally aligned with the submitted [`Calls`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MulticallContractResponse {
    pub results: Vec<CallContractResult>,
}

/// One pool contract registered under the pool registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubContract {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubContractResponse {
    #[serde(default)]
    pub sub_contracts: Vec<SubContract>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfoResponse {
    pub current_height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockHashesResponse {
    #[serde(default)]
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractEvent {
    #[serde(default)]
    pub block_hash: Option<String>,
    pub tx_id: String,
    pub contract_address: String,
    pub event_index: i32,
    #[serde(default)]
    pub fields: Vec<Val>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockEventsResponse {
    #[serde(default)]
    pub events: Vec<ContractEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenAmount {
    pub id: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub atto_alph_amount: Option<String>,
    #[serde(default)]
    pub tokens: Vec<TokenAmount>,
    #[serde(default)]
    pub contract_input: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub address: String,
    pub atto_alph_amount: String,
    #[serde(default)]
    pub tokens: Vec<TokenAmount>,
}

/// Backend view of a transaction, used to correlate swap events with pool interactions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetailsResponse {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub hash: String,
    pub block_hash: String,
    pub timestamp: u64,
    #[serde(default)]
    pub inputs: Vec<TransactionInput>,
    #[serde(default)]
    pub outputs: Vec<TransactionOutput>,
    #[serde(default)]
    pub gas_amount: Option<u64>,
    #[serde(default)]
    pub gas_price: Option<String>,
    #[serde(default)]
    pub script_execution_ok: bool,
    #[serde(default)]
    pub coinbase: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAsset {
    pub address: String,
    pub atto_alph_amount: String,
    #[serde(default)]
    pub tokens: Vec<TokenAmount>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractStateResponse {
    pub address: String,
    pub bytecode: String,
    pub code_hash: String,
    #[serde(default)]
    pub initial_state_hash: Option<String>,
    #[serde(default)]
    pub imm_fields: Vec<Val>,
    #[serde(default)]
    pub mut_fields: Vec<Val>,
    pub asset: ContractAsset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn call_request_uses_camel_case() {
        let req = CallContractRequest {
            group: 1,
            address: "abc".to_string(),
            method_index: 7,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"group": 1, "address": "abc", "methodIndex": 7})
        );
    }

    #[test]
    fn call_result_from_tagged_forms() {
        let ok: CallContractResult = serde_json::from_value(json!({
            "type": "CallContractSucceeded",
            "returns": [{"type": "ByteVec", "value": "4159494e"}],
            "gasUsed": 5000
        }))
        .unwrap();
        assert_eq!(
            ok.into_returns().unwrap()[0].as_str(),
            Some("4159494e")
        );

        let failed: CallContractResult = serde_json::from_value(json!({
            "type": "CallContractFailed",
            "error": "VM execution error: AssertionFailed"
        }))
        .unwrap();
        assert_eq!(
            failed.into_returns().unwrap_err(),
            "VM execution error: AssertionFailed"
        );
    }

    #[test]
    fn call_result_from_nullable_error_form() {
        let ok: CallContractResult = serde_json::from_value(json!({
            "returns": [{"type": "U256", "value": "18"}],
            "error": null
        }))
        .unwrap();
        assert!(matches!(ok, CallContractResult::Succeeded { .. }));

        let failed: CallContractResult =
            serde_json::from_value(json!({"returns": [], "error": "boom"})).unwrap();
        assert_eq!(failed, CallContractResult::Failed { error: "boom".to_string() });
    }

    #[test]
    fn sub_contracts_are_plain_addresses() {
        let resp: SubContractResponse =
            serde_json::from_value(json!({"subContracts": ["a", "b"]})).unwrap();
        assert_eq!(
            resp.sub_contracts,
            vec![
                SubContract { address: "a".to_string() },
                SubContract { address: "b".to_string() }
            ]
        );
    }

    #[test]
    fn bool_values_are_not_strings() {
        let val: Val = serde_json::from_value(json!({"type": "Bool", "value": true})).unwrap();
        assert_eq!(val.as_str(), None);
    }
}
