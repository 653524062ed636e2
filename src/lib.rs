//! # Alephium Swap Indexer
//!
//! A read-only client for indexing swap pools on Alephium. It discovers the
//! pool contracts registered under the Ayin pair factory, resolves each
//! pool's two tokens and their on-chain metadata, and polls blocks and
//! events so that new swaps can be picked up after the initial discovery.
//!
//! ## Overview
//!
//! - **Codec**: base58 address handling, shard group derivation, token id to
//!   address conversion and hex-packed string decoding. Pure functions.
//! - **Gateway**: JSON over HTTPS against the node and backend APIs, with a
//!   fixed post-call sleep as the rate limiter and an optional debug dump.
//! - **Discovery**: sub-contracts of the pool registry, pages 1 and 2.
//! - **Token Metadata**: token pair per pool, then symbol/name/decimals per
//!   token in a single multi-call.
//! - **Chain**: height, block hashes, block events and transaction details.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use alephium_swap_indexer::{AlephiumClient, Settings};
//!
//! # async fn run() -> alephium_swap_indexer::Result<()> {
//! let client = AlephiumClient::new(Settings::default())?;
//! for pool in client.discover_pool_tokens(100).await? {
//!     let asset = client.resolve_token_metadata(&pool.token0, "Alephium").await?;
//!     println!("{} trades {}", pool.pool, asset.symbol);
//! }
//! # Ok(())
//! # }
//! ```

/// Address and byte-string codec
pub mod codec;
/// Error taxonomy
pub mod error;
/// Node and backend API records, resolved assets
pub mod types;
/// Configuration management
pub mod settings;

/// Rate-limited HTTP gateway and debug decorator
pub mod gateway;
/// Per-network client handle
pub mod client;
/// Contract call and multi-call batching
pub mod multicall;
/// Swap pool discovery
pub mod discovery;
/// Token pair and token metadata resolution
pub mod token_metadata;
/// Block and event polling
pub mod chain;

pub use chain::{filter_events, SWAP_EVENT_INDEX};
pub use client::AlephiumClient;
pub use error::{IndexerError, Result};
pub use settings::Settings;
pub use types::{Asset, ContractEvent, PoolTokens, SubContract};
