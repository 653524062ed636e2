use serde::{Deserialize, Serialize};

/// Blockchain label carried by every resolved asset.
pub const ALEPHIUM: &str = "Alephium";

/// Canonical token record handed to the price pipeline.
///
/// Unique by `(blockchain, address)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub blockchain: String,
}

impl Asset {
    /// ALPH has no token contract behind it; its metadata is fixed.
    /// See https://github.com/alephium/token-list/blob/master/tokens/mainnet.json
    pub fn native_alph() -> Self {
        Self {
            address: NATIVE_TOKEN_ADDRESS.to_string(),
            symbol: "ALPH".to_string(),
            name: "Alephium".to_string(),
            decimals: 18,
            blockchain: ALEPHIUM.to_string(),
        }
    }

    pub fn key(&self) -> (&str, &str) {
        (&self.blockchain, &self.address)
    }
}

/// Address derived from the all-zero token id.
pub const NATIVE_TOKEN_ADDRESS: &str = "tgx7VNFoP9DJiFMFgXXtafQZkUvyEdDHT9ryamHJYrjq";

/// A discovered pool together with its two token addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolTokens {
    pub pool: String,
    pub token0: String,
    pub token1: String,
}
