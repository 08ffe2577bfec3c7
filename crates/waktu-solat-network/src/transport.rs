//! The HTTP seam.
//!
//! The executor only needs "GET this URL, give me status, headers and body".
//! [`ReqwestTransport`] is the production implementation; tests and embedders
//! can plug in their own.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Url};

use crate::config::ClientConfig;
use crate::error::{Result, TransportError, WaktuSolatError};

/// A completed HTTP exchange.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Body as text, or `None` when it is not UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Performs a single GET request.
///
/// Implementations return `Err` only when no response was obtained; any HTTP
/// status, including 4xx/5xx, is a successful exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> std::result::Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by `reqwest` with rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a `reqwest` client using the configured timeout and user agent.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .user_agent(config.user_agent_str())
            .build()
            .map_err(|e| WaktuSolatError::invalid_config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one shared with the rest of an application.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> std::result::Result<RawResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
