use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::types::ALEPHIUM;

fn default_node_url() -> String {
    "https://node.mainnet.alephium.org".to_string()
}
fn default_backend_url() -> String {
    "https://backend.mainnet.alephium.org".to_string()
}
/// Ayin pair factory; every swap pool is one of its sub-contracts.
fn default_pool_registry_address() -> String {
    "vyrkJHG49TXss6pGAz2dVxq5o7mBXNNXAV18nAeqVT1R".to_string()
}
fn default_blockchain() -> String {
    ALEPHIUM.to_string()
}
fn default_sleep_between_calls_ms() -> u64 {
    300
}
fn default_refresh_delay_ms() -> u64 {
    400
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_swap_contracts_limit() -> u32 {
    100
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_node_url")]
    pub node_url: String,
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_pool_registry_address")]
    pub pool_registry_address: String,
    #[serde(default = "default_blockchain")]
    pub blockchain: String,
    /// Fixed pause after every API call to stay under the upstream rate limit.
    #[serde(default = "default_sleep_between_calls_ms")]
    pub sleep_between_calls_ms: u64,
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_swap_contracts_limit")]
    pub swap_contracts_limit: u32,
    /// Dump raw requests and responses to the log.
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub chain_from_group: u8,
    #[serde(default)]
    pub chain_to_group: u8,
    #[serde(default)]
    pub events_group: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            node_url: default_node_url(),
            backend_url: default_backend_url(),
            pool_registry_address: default_pool_registry_address(),
            blockchain: default_blockchain(),
            sleep_between_calls_ms: default_sleep_between_calls_ms(),
            refresh_delay_ms: default_refresh_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            swap_contracts_limit: default_swap_contracts_limit(),
            debug: false,
            chain_from_group: 0,
            chain_to_group: 0,
            events_group: 0,
        }
    }
}

impl Settings {
    /// Loads `Config.toml` from the working directory if present, then `ALEPHIUM_*` env vars.
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(File::with_name("Config").required(false))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::build(File::from(path.as_ref()))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let s = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("ALEPHIUM").try_parsing(true))
            .build()?;
        s.try_deserialize()
    }

    pub fn sleep_between_calls(&self) -> Duration {
        Duration::from_millis(self.sleep_between_calls_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
