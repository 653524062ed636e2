//! # Pool Scanner
//!
//! Command-line front end for the Alephium swap indexer.
//!
//! - `scan` discovers Ayin pools and prints each pool with both resolved
//!   tokens as one JSON line.
//! - `watch` follows the chain from the current height and prints swap
//!   events (with their transaction details when the pool is known).
//!
//! ```bash
//! cargo run --bin pool_scanner -- scan
//! RUST_LOG=debug ALEPHIUM_DEBUG=true cargo run --bin pool_scanner -- watch
//! ```

use std::collections::HashSet;

use alephium_swap_indexer::{AlephiumClient, Settings};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::signal;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Discover Alephium swap pools and follow swap activity")]
struct Args {
    /// Path to a TOML settings file (defaults to ./Config.toml when present)
    #[arg(long)]
    config: Option<String>,

    /// Page size for pool discovery (overrides settings)
    #[arg(long)]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover pools and resolve their token metadata
    Scan,
    /// Poll new blocks for swap events
    Watch {
        /// Skip pool discovery; report every swap event
        #[arg(long)]
        all_pools: bool,
    },
}

async fn scan(client: &AlephiumClient, page_size: u32) -> Result<HashSet<String>> {
    let blockchain = client.settings().blockchain.clone();
    let pools = client.discover_pool_tokens(page_size).await?;
    let mut known = HashSet::with_capacity(pools.len());

    for pool in pools {
        let token0 = client.resolve_token_metadata(&pool.token0, &blockchain).await?;
        let token1 = client.resolve_token_metadata(&pool.token1, &blockchain).await?;
        println!("{}", json!({ "pool": pool.pool, "token0": token0, "token1": token1 }));
        known.insert(pool.pool);
    }
    Ok(known)
}

async fn process_height(client: &AlephiumClient, height: u64, pools: Option<&HashSet<String>>) -> Result<()> {
    for block_hash in client.block_hashes_at_height(height).await? {
        for event in client.swap_events_in_block(&block_hash).await? {
            let known = pools.map_or(true, |p| p.contains(&event.contract_address));
            if !known {
                continue;
            }
            let details = client.transaction_details(&event.tx_id).await?;
            println!(
                "{}",
                json!({
                    "height": height,
                    "block": block_hash,
                    "pool": event.contract_address,
                    "tx": event.tx_id,
                    "timestamp": details.timestamp,
                    "scriptExecutionOk": details.script_execution_ok,
                })
            );
        }
    }
    Ok(())
}

async fn watch(client: &AlephiumClient, pools: Option<HashSet<String>>) -> Result<()> {
    let mut last_seen = client.current_height().await?;
    info!(height = last_seen, "watching for swap events");

    loop {
        sleep(client.settings().refresh_delay()).await;

        let height = match client.current_height().await {
            Ok(height) => height,
            Err(e) => {
                warn!(error = %e, "failed to fetch current height, retrying");
                continue;
            }
        };

        while last_seen < height {
            let next = last_seen + 1;
            if let Err(e) = process_height(client, next, pools.as_ref()).await {
                warn!(height = next, error = %e, "failed to process height, retrying");
                break;
            }
            last_seen = next;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new()?,
    };
    let page_size = args.page_size.unwrap_or(settings.swap_contracts_limit);
    let client = AlephiumClient::new(settings)?;

    match args.command {
        Command::Scan => {
            let pools = scan(&client, page_size).await?;
            info!(pools = pools.len(), "scan complete");
        }
        Command::Watch { all_pools } => {
            let pools = if all_pools {
                None
            } else {
                let discovered = client.discover_pools(page_size).await?;
                Some(discovered.into_iter().map(|p| p.address).collect())
            };
            tokio::select! {
                result = watch(&client, pools) => result?,
                _ = signal::ctrl_c() => info!("shutdown signal received"),
            }
        }
    }

    Ok(())
}
