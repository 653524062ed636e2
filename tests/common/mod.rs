#![allow(dead_code)]

use std::time::Duration;

use alephium_swap_indexer::{AlephiumClient, Settings};

pub const REGISTRY: &str = "vyrkJHG49TXss6pGAz2dVxq5o7mBXNNXAV18nAeqVT1R";

/// Token contract in group 0 (contract id ends in 0x00).
pub const AYIN_TOKEN: &str = "vT49PY8ksoUL6NcXiZ1t2wAmC7tTPRfFfER8n3UCLvXy";
pub const AYIN_TOKEN_ID: &str = "1a281053ba8601a658368594da034c2e99a0fb951b86498d05e76aedfe666800";

pub fn settings_for(server: &mockito::ServerGuard) -> Settings {
    Settings {
        node_url: server.url(),
        backend_url: server.url(),
        sleep_between_calls_ms: 0,
        ..Settings::default()
    }
}

pub fn client_for(server: &mockito::ServerGuard) -> AlephiumClient {
    AlephiumClient::new(settings_for(server)).expect("client should build")
}

pub fn client_with_delay(server: &mockito::ServerGuard, delay: Duration) -> AlephiumClient {
    let settings = Settings {
        sleep_between_calls_ms: delay.as_millis() as u64,
        ..settings_for(server)
    };
    AlephiumClient::new(settings).expect("client should build")
}
