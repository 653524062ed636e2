use thiserror::Error;

/// Failures surfaced by the indexing client.
///
/// None of these are retried internally; the caller owns retry and backoff.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexerError {
    /// Network or TLS failure before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success HTTP status.
    #[error("api error: status {status}, body: {body}")]
    Api { status: u16, body: String },

    /// Malformed hex, JSON or numeric payload.
    #[error("decode error: {0}")]
    Decode(String),

    /// The node executed the contract call and reported an error string.
    #[error("contract call failed: {0}")]
    ContractCall(String),

    /// Address string is not a valid Alephium address.
    #[error("invalid address: {0}")]
    AddressFormat(String),

    /// The client could not be built from its settings.
    #[error("configuration error: {0}")]
    Config(String),
}

impl IndexerError {
    pub fn decode(msg: impl Into<String>) -> Self {
        IndexerError::Decode(msg.into())
    }

    pub fn address(msg: impl Into<String>) -> Self {
        IndexerError::AddressFormat(msg.into())
    }
}

impl From<reqwest::Error> for IndexerError {
    fn from(err: reqwest::Error) -> Self {
        IndexerError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for IndexerError {
    fn from(err: serde_json::Error) -> Self {
        IndexerError::Decode(err.to_string())
    }
}

impl From<hex::FromHexError> for IndexerError {
    fn from(err: hex::FromHexError) -> Self {
        IndexerError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IndexerError>;
