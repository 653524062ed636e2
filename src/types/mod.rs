/// Node and backend API records
pub mod api;
/// Resolved asset and pool records
pub mod asset;

pub use api::*;
pub use asset::{Asset, PoolTokens, ALEPHIUM, NATIVE_TOKEN_ADDRESS};
