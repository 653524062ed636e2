use url::Url;

use crate::error::{IndexerError, Result};
use crate::gateway::{Exchange, Gateway};
use crate::settings::Settings;

/// Read-only client for one Alephium network.
///
/// Owns its own HTTP transport and rate-limit delay; nothing is shared between
/// instances. Operations are meant to be awaited one at a time: the post-call
/// sleep does not serialize concurrent callers.
///
/// The operations themselves live next to their concerns:
/// pool discovery in [`crate::discovery`], contract calls in
/// [`crate::multicall`], token resolution in [`crate::token_metadata`] and
/// block/event polling in [`crate::chain`].
pub struct AlephiumClient {
    pub(crate) gateway: Gateway,
    pub(crate) settings: Settings,
    node_url: Url,
    backend_url: Url,
}

impl AlephiumClient {
    pub fn new(settings: Settings) -> Result<Self> {
        let gateway = Gateway::from_settings(&settings)?;
        Self::with_gateway(settings, gateway)
    }

    /// Uses a caller-provided transport instead of the default HTTPS one.
    pub fn with_exchange<E: Exchange + 'static>(settings: Settings, exchange: E) -> Result<Self> {
        let gateway = Gateway::new(exchange, settings.sleep_between_calls());
        Self::with_gateway(settings, gateway)
    }

    fn with_gateway(settings: Settings, gateway: Gateway) -> Result<Self> {
        let node_url = parse_base(&settings.node_url)?;
        let backend_url = parse_base(&settings.backend_url)?;
        Ok(Self {
            gateway,
            settings,
            node_url,
            backend_url,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn node_endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        endpoint(&self.node_url, path, query)
    }

    pub(crate) fn backend_endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        endpoint(&self.backend_url, path, query)
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| IndexerError::Config(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(IndexerError::Config(format!("{} cannot be a base url", raw)));
    }
    Ok(url)
}

fn endpoint(base: &Url, path: &str, query: &[(&str, String)]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| IndexerError::Config(format!("{} cannot be a base url", base)))?;
        segments.pop_if_empty();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            segments.push(segment);
        }
    }
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}
