//! Transport trait and reqwest implementation

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Blocking-style request collaborator used by the fetch engine
///
/// Calls are issued one at a time; the engine awaits each `get` before
/// issuing the next.
#[async_trait]
pub trait Transport: Send {
    /// Clear every header previously set
    fn reset_headers(&mut self);

    /// Set headers for subsequent requests, each formatted as `Name: value`
    fn set_headers(&mut self, headers: Vec<String>);

    /// Perform a GET and return the raw body, or an empty string on failure
    async fn get(&mut self, url: &str) -> String;
}

/// Configuration for [`ReqwestTransport`]
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("tokenfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Create a new config builder
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for transport config
#[derive(Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> TransportConfig {
        self.config
    }
}

/// Transport backed by a reqwest client
pub struct ReqwestTransport {
    client: Client,
    headers: HeaderMap,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&TransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: &TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            headers: HeaderMap::new(),
        })
    }

    /// Headers currently applied to requests
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("header_count", &self.headers.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn reset_headers(&mut self) {
        self.headers.clear();
    }

    fn set_headers(&mut self, headers: Vec<String>) {
        for line in headers {
            match parse_header_line(&line) {
                Some((name, value)) => {
                    self.headers.insert(name, value);
                }
                None => {
                    let name = line.split(':').next().unwrap_or_default();
                    warn!(header = name, "Ignoring malformed header line");
                }
            }
        }
    }

    async fn get(&mut self, url: &str) -> String {
        let response = match self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(url, error = %e, "GET request failed");
                return String::new();
            }
        };

        let status = response.status();
        debug!(url, status = status.as_u16(), "GET request completed");

        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url, error = %e, "Failed to read response body");
                String::new()
            }
        }
    }
}

/// Split `Name: value` into a typed header pair
fn parse_header_line(line: &str) -> Option<(HeaderName, HeaderValue)> {
    let (name, value) = line.split_once(':')?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).ok()?;
    let value = HeaderValue::from_str(value.trim()).ok()?;
    Some((name, value))
}
