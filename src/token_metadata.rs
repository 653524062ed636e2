//! # Token Metadata
//!
//! Resolves a pool's token pair and each token's symbol, name and decimals.
//!
//! Token contracts expose `getSymbol`, `getName` and `getDecimals` at method
//! indices 0, 1 and 2; pool contracts expose their token pair at index 7. The
//! three metadata reads go out as one multi-call and must all succeed.

use tracing::{debug, error};

use crate::client::AlephiumClient;
use crate::codec::{address_from_token_id, decode_hex, group_of_address};
use crate::error::{IndexerError, Result};
use crate::multicall::method_calls;
use crate::types::{Asset, CallContractRequest, CallContractResult, Val, NATIVE_TOKEN_ADDRESS};

pub const SYMBOL_METHOD: u32 = 0;
pub const NAME_METHOD: u32 = 1;
pub const DECIMALS_METHOD: u32 = 2;
pub const TOKEN_PAIR_METHOD: u32 = 7;

/// Metadata batch, in result order.
pub const METADATA_METHODS: [u32; 3] = [SYMBOL_METHOD, NAME_METHOD, DECIMALS_METHOD];

impl AlephiumClient {
    /// Returns the two token addresses traded by `pool_address`.
    pub async fn resolve_pool_tokens(&self, pool_address: &str) -> Result<(String, String)> {
        let call = CallContractRequest {
            group: group_of_address(pool_address)?,
            address: pool_address.to_string(),
            method_index: TOKEN_PAIR_METHOD,
        };

        let result = self.call_contract(&call).await.map_err(|e| {
            error!(function = "resolve_pool_tokens", pool = %pool_address, error = %e, "failed to call api");
            e
        })?;

        let returns = result.into_returns().map_err(|message| {
            error!(
                function = "resolve_pool_tokens",
                pool = %pool_address,
                method_index = TOKEN_PAIR_METHOD,
                error = %message,
                "failed to get token pair"
            );
            IndexerError::ContractCall(message)
        })?;

        let decoded = decode_token_pair(&returns);
        if let Err(e) = &decoded {
            error!(function = "resolve_pool_tokens", pool = %pool_address, returns = ?returns, error = %e, "failed to decode token pair");
        }
        decoded
    }

    /// Resolves an [`Asset`] for `token_address`.
    ///
    /// ALPH is answered locally without a network call.
    pub async fn resolve_token_metadata(&self, token_address: &str, blockchain: &str) -> Result<Asset> {
        if token_address == NATIVE_TOKEN_ADDRESS {
            return Ok(Asset::native_alph());
        }

        let calls = method_calls(token_address, &METADATA_METHODS)?;
        let results = self.multicall(&calls).await.map_err(|e| {
            error!(function = "resolve_token_metadata", token = %token_address, error = %e, "failed to call api");
            e
        })?;

        let asset = decode_token_metadata(token_address, blockchain, results);
        match &asset {
            Ok(asset) => debug!(token = %token_address, symbol = %asset.symbol, "resolved token metadata"),
            Err(e) => error!(function = "resolve_token_metadata", token = %token_address, error = %e, "failed to get token info"),
        }
        asset
    }
}

fn string_value<'a>(val: Option<&'a Val>, what: &str) -> Result<&'a str> {
    let val = val.ok_or_else(|| IndexerError::decode(format!("missing {} value", what)))?;
    val.as_str()
        .ok_or_else(|| IndexerError::decode(format!("{} value is not a string: {}", what, val.value)))
}

/// Decodes the two token ids returned by a pool's token-pair method into addresses.
pub fn decode_token_pair(returns: &[Val]) -> Result<(String, String)> {
    let token0 = address_from_token_id(string_value(returns.first(), "token0 id")?)?;
    let token1 = address_from_token_id(string_value(returns.get(1), "token1 id")?)?;
    Ok((token0, token1))
}

/// Parses an unsigned base-10 decimals value that must fit in 8 bits.
pub fn parse_decimals(raw: &str) -> Result<u8> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IndexerError::decode(format!("decimals is not an unsigned integer: {:?}", raw)));
    }
    raw.parse::<u8>()
        .map_err(|e| IndexerError::decode(format!("decimals {} out of range: {}", raw, e)))
}

/// Builds an [`Asset`] from the symbol/name/decimals multi-call results.
///
/// Every sub-call must have succeeded; the first error string fails the whole asset.
pub fn decode_token_metadata(
    address: &str,
    blockchain: &str,
    results: Vec<CallContractResult>,
) -> Result<Asset> {
    if results.len() != METADATA_METHODS.len() {
        return Err(IndexerError::decode(format!(
            "expected {} metadata results, got {}",
            METADATA_METHODS.len(),
            results.len()
        )));
    }

    let mut values = Vec::with_capacity(results.len());
    for result in results {
        let returns = result.into_returns().map_err(IndexerError::ContractCall)?;
        values.push(returns);
    }

    let symbol = decode_hex(string_value(values[SYMBOL_METHOD as usize].first(), "symbol")?)?;
    let name = decode_hex(string_value(values[NAME_METHOD as usize].first(), "name")?)?;
    let decimals = parse_decimals(string_value(values[DECIMALS_METHOD as usize].first(), "decimals")?)?;

    Ok(Asset {
        address: address.to_string(),
        symbol,
        name,
        decimals,
        blockchain: blockchain.to_string(),
    })
}
