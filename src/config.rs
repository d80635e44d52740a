//! Engine configuration
//!
//! Settings for the fetch engine and its transport, loadable from YAML:
//!
//! ```yaml
//! hostname: https://lms.example.com
//! api_path: /api/v3
//! page_size: 1000
//! batch_size: 50
//! timeout_seconds: 30
//! ```

use crate::error::{Error, Result};
use crate::http::TransportConfig;
use crate::types::{DEFAULT_BATCH_SIZE, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Engine Config
// ============================================================================

/// Configuration for a [`FetchEngine`](crate::engine::FetchEngine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scheme and host of the API, e.g. `https://lms.example.com`
    pub hostname: String,

    /// Path prefix of the REST API
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// Records requested per page when walking a collection
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Ids sent per request when looking up a list of ids
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Transport timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Override the transport user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_path() -> String {
    "/api/v3".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_timeout_seconds() -> u64 {
    30
}

impl EngineConfig {
    /// Create a config for a host with default settings
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            api_path: default_api_path(),
            page_size: default_page_size(),
            batch_size: default_batch_size(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: None,
        }
    }

    /// Set the API path prefix
    #[must_use]
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the batch size
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the transport timeout
    #[must_use]
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Load and validate a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load and validate a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field
    pub fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(Error::invalid_value("hostname", "cannot be empty"));
        }

        let url = Url::parse(&self.hostname)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "hostname",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        self.page_size_nonzero()?;
        self.batch_size_nonzero()?;

        if self.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "timeout_seconds",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// `<hostname><api_path>` without a trailing slash
    pub fn api_base_url(&self) -> String {
        let host = self.hostname.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        if path.is_empty() {
            host.to_string()
        } else {
            format!("{host}/{path}")
        }
    }

    /// Page size as a non-zero value
    pub fn page_size_nonzero(&self) -> Result<NonZeroU32> {
        NonZeroU32::new(self.page_size)
            .ok_or_else(|| Error::invalid_value("page_size", "must be greater than zero"))
    }

    /// Batch size as a non-zero value
    pub fn batch_size_nonzero(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.batch_size)
            .ok_or_else(|| Error::invalid_value("batch_size", "must be greater than zero"))
    }

    /// Transport settings derived from this config
    pub fn transport_config(&self) -> TransportConfig {
        let builder = TransportConfig::builder().timeout(Duration::from_secs(self.timeout_seconds));
        match &self.user_agent {
            Some(agent) => builder.user_agent(agent).build(),
            None => builder.build(),
        }
    }
}
