//! Client configuration

use crate::{ClientError, Result};
use std::time::Duration;

/// Client configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// DAM server base URL, without the `/api` suffix
    pub base_url: String,
    /// API key identifier, sent as `X-API-Key-ID`
    pub key_id: String,
    /// API key secret, sent as `X-API-Key-Secret`
    pub key_secret: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Config {
    /// Create a config from the three required credentials.
    ///
    /// Fails with [`ClientError::Config`] if any of them is empty; a single
    /// trailing slash on `base_url` is stripped.
    pub fn new(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let key_id = key_id.into();
        let key_secret = key_secret.into();

        if base_url.is_empty() {
            return Err(ClientError::Config("base_url is required".to_string()));
        }
        if key_id.is_empty() {
            return Err(ClientError::Config("key_id is required".to_string()));
        }
        if key_secret.is_empty() {
            return Err(ClientError::Config("key_secret is required".to_string()));
        }

        let base_url = base_url
            .strip_suffix('/')
            .map(str::to_string)
            .unwrap_or(base_url);

        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("invalid base_url: {}", e)))?;

        Ok(Self {
            base_url,
            key_id,
            key_secret,
            timeout: Duration::from_secs(30),
            user_agent: format!("damkit-client/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// API root for every request (`<base_url>/api`)
    pub fn api_root(&self) -> String {
        format!("{}/api", self.base_url)
    }
}
