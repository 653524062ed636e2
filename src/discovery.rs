//! Swap pool discovery.
//!
//! Pools are the sub-contracts of the pool registry, listed by the backend API.

use tracing::{error, info};

use crate::client::AlephiumClient;
use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::types::{PoolTokens, SubContract, SubContractResponse};

/// Backend pages fetched per discovery run (1-based). Later pages are never requested.
pub const DISCOVERY_PAGES: [u32; 2] = [1, 2];

impl AlephiumClient {
    /// Fetches one page of sub-contracts registered under the pool registry.
    pub async fn sub_contracts_page(&self, page_size: u32, page: u32) -> Result<Vec<SubContract>> {
        let registry = &self.settings.pool_registry_address;
        let url = self.backend_endpoint(
            &format!("/contracts/{}/sub-contracts", registry),
            &[("limit", page_size.to_string()), ("page", page.to_string())],
        )?;

        let response: SubContractResponse = self.gateway.call(ApiRequest::get(url)).await.map_err(|e| {
            error!(function = "sub_contracts_page", registry = %registry, page, error = %e, "failed to list sub-contracts");
            e
        })?;
        Ok(response.sub_contracts)
    }

    /// Lists swap pools from [`DISCOVERY_PAGES`], in page order.
    ///
    /// Any page failure aborts the whole run; no partial list is returned.
    pub async fn discover_pools(&self, page_size: u32) -> Result<Vec<SubContract>> {
        let mut pools = Vec::new();
        for page in DISCOVERY_PAGES {
            pools.extend(self.sub_contracts_page(page_size, page).await?);
        }
        info!(pools = pools.len(), "discovered swap pools");
        Ok(pools)
    }

    /// Discovers pools and resolves each one's token pair, in discovery order.
    pub async fn discover_pool_tokens(&self, page_size: u32) -> Result<Vec<PoolTokens>> {
        let pools = self.discover_pools(page_size).await?;
        let mut out = Vec::with_capacity(pools.len());
        for pool in pools {
            let (token0, token1) = self.resolve_pool_tokens(&pool.address).await?;
            out.push(PoolTokens {
                pool: pool.address,
                token0,
                token1,
            });
        }
        Ok(out)
    }
}
