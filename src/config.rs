//! Client configuration
//!
//! A YAML file describing where the API lives and how resources map to
//! URIs:
//!
//! ```yaml
//! base_url: https://shop.example.com/api/
//! timeout_secs: 10
//! headers:
//!   Authorization: Bearer token
//! rate_limit:
//!   requests_per_second: 5
//! resources:
//!   variants: products/{productId}/variants
//! allow_default_uris: true
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::uri::ArrayUriMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Client Config
// ============================================================================

/// Complete client configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the API; resource URIs are relative to it
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Resource name to URI template
    #[serde(default)]
    pub resources: HashMap<String, String>,

    /// Use the resource name as URI for unmapped resources
    #[serde(default = "default_true")]
    pub allow_default_uris: bool,
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl ClientConfig {
    /// Config pointing at `base_url` with every other setting defaulted
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout(),
            user_agent: None,
            headers: HashMap::new(),
            rate_limit: None,
            resources: HashMap::new(),
            allow_default_uris: true,
        }
    }

    /// Transport settings for [`crate::http::HttpClient`]
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs));

        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(rate_limit) = &self.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }

        builder.build()
    }

    /// Resource map for [`crate::api::ApiResolver`]
    pub fn uri_map(&self) -> ArrayUriMap {
        ArrayUriMap::new(self.resources.clone(), self.allow_default_uris)
    }

    /// Check the config for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base_url cannot be empty"));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than 0"));
        }

        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::config(
                    "rate_limit.requests_per_second must be greater than 0",
                ));
            }
        }

        for (resource, uri) in &self.resources {
            if resource.is_empty() {
                return Err(Error::config("Resource names cannot be empty"));
            }
            if uri.trim().is_empty() {
                return Err(Error::config(format!(
                    "Resource '{resource}' has an empty URI"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a client config file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {e}",
            path.display()
        ))
    })?;
    load_config_from_str(&content)
}

/// Load and validate a client config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ClientConfig> {
    let config: ClientConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;

    config.validate()?;
    Ok(config)
}
