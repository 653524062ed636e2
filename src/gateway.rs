//! # API Gateway
//!
//! Every node and backend request goes through [`Gateway::call`], which
//! executes the request, checks the status, decodes the JSON body and then
//! sleeps for the configured delay. That sleep is the only rate limiting in
//! the crate: callers are throttled simply by awaiting one call at a time.
//!
//! Transport is behind the [`Exchange`] trait so that diagnostics can be
//! layered on as a decorator ([`DebugDump`]) without touching the call path.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::error::{IndexerError, Result};
use crate::settings::Settings;

const JSON: &str = "application/json";

/// Raw request as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: vec![(ACCEPT.as_str().to_string(), JSON.to_string())],
            body: None,
        }
    }

    pub fn post_json<T: Serialize>(url: Url, payload: &T) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            url,
            headers: vec![
                (ACCEPT.as_str().to_string(), JSON.to_string()),
                (CONTENT_TYPE.as_str().to_string(), JSON.to_string()),
            ],
            body: Some(serde_json::to_vec(payload)?),
        })
    }

    fn dump(&self) -> String {
        render(
            &format!("{} {}", self.method, self.url),
            &self.headers,
            self.body.as_deref().unwrap_or_default(),
        )
    }
}

/// Raw response with the body fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    fn dump(&self) -> String {
        render(&format!("HTTP {}", self.status), &self.headers, &self.body)
    }
}

fn render(start_line: &str, headers: &[(String, String)], body: &[u8]) -> String {
    let mut out = String::from(start_line);
    for (name, value) in headers {
        out.push('\n');
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
    }
    out.push_str("\n\n");
    out.push_str(&String::from_utf8_lossy(body));
    out
}

/// One request/response exchange with a remote API.
#[async_trait]
pub trait Exchange: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport: rustls with TLS 1.2 as the floor and a fixed per-request deadline.
pub struct HttpExchange {
    client: Client,
}

impl HttpExchange {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .use_rustls_tls()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Exchange for HttpExchange {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut builder = self.client.request(request.method.clone(), request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = resp.bytes().await?.to_vec();

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Decorator that logs the full request and response around an inner [`Exchange`].
///
/// Rendering is lossy and cannot fail, so the inner outcome is always returned untouched.
pub struct DebugDump<E> {
    inner: E,
}

impl<E: Exchange> DebugDump<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<E: Exchange> Exchange for DebugDump<E> {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        debug!(dump = %request.dump(), "request out");
        let result = self.inner.execute(request).await;
        match &result {
            Ok(resp) => debug!(dump = %resp.dump(), "response in"),
            Err(e) => debug!(url = %request.url, error = %e, "no response"),
        }
        result
    }
}

/// Rate-limited JSON gateway shared by every client operation.
pub struct Gateway {
    exchange: Box<dyn Exchange>,
    sleep_between_calls: Duration,
}

impl Gateway {
    pub fn new<E: Exchange + 'static>(exchange: E, sleep_between_calls: Duration) -> Self {
        Self {
            exchange: Box::new(exchange),
            sleep_between_calls,
        }
    }

    /// Builds the HTTP transport, wrapped in [`DebugDump`] when `settings.debug` is set.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = HttpExchange::new(settings.request_timeout())?;
        let gateway = if settings.debug {
            Self::new(DebugDump::new(http), settings.sleep_between_calls())
        } else {
            Self::new(http, settings.sleep_between_calls())
        };
        Ok(gateway)
    }

    pub fn sleep_between_calls(&self) -> Duration {
        self.sleep_between_calls
    }

    /// Executes `request` and decodes the JSON body into `T`.
    ///
    /// Once a response has been read (success or not) the gateway waits
    /// `sleep_between_calls` before returning.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = match self.exchange.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!(url = %request.url, error = %e, "failed to call api");
                return Err(e);
            }
        };
        self.waiting().await;

        if !response.is_success() {
            let body = response.body_text();
            error!(
                status = response.status,
                body = %body,
                url = %request.url,
                "not 2xx http response code from api"
            );
            return Err(IndexerError::Api {
                status: response.status,
                body,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            error!(
                url = %request.url,
                body = %response.body_text(),
                error = %e,
                "failed to decode api response"
            );
            IndexerError::from(e)
        })
    }

    async fn waiting(&self) {
        if !self.sleep_between_calls.is_zero() {
            tokio::time::sleep(self.sleep_between_calls).await;
        }
    }
}
