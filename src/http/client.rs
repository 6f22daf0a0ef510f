//! HTTP client used by the resource layer
//!
//! Provides:
//! - Verb dispatch against a configurable base URL
//! - JSON bodies, and multipart bodies when files are attached
//! - Optional client-side rate limiting
//!
//! Non-success statuses are returned as regular responses.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::response::ApiResponse;
use crate::error::{Error, Result};
use crate::types::{scalar_to_string, Files, JsonValue, Method, Params};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Transport operations the resource layer depends on
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// GET `url` with query parameters
    async fn get(&self, url: &str, query: &Params) -> Result<ApiResponse>;

    /// POST a JSON body, or a multipart body when `files` is not empty
    async fn post(&self, url: &str, body: &JsonValue, files: &Files) -> Result<ApiResponse>;

    /// PATCH a JSON body
    async fn patch(&self, url: &str, body: &JsonValue) -> Result<ApiResponse>;

    /// PUT a JSON body
    async fn put(&self, url: &str, body: &JsonValue) -> Result<ApiResponse>;

    /// DELETE `url`
    async fn delete(&self, url: &str) -> Result<ApiResponse>;

    /// `scheme://host` of the API, when known
    fn scheme_and_host(&self) -> Option<String>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            rate_limit: None,
            default_headers,
            user_agent: format!("hal-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header (replaces a previous value for the same name)
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Body attached to an outgoing request
enum Payload<'a> {
    Empty,
    Json(&'a JsonValue),
    Multipart(Form),
}

/// `reqwest`-backed implementation of [`ApiClient`]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Create a client for the API rooted at `url`
    pub fn from_url(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        Url::parse(&url)?;
        Self::with_config(HttpClientConfig::builder().base_url(url).build())
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        query: Option<&Params>,
        payload: Payload<'_>,
    ) -> Result<ApiResponse> {
        let full_url = self.build_url(url);

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.into(), &full_url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let pairs: Vec<(&str, String)> = query
                .iter()
                .map(|(k, v)| (k.as_str(), scalar_to_string(v)))
                .collect();
            req = req.query(&pairs);
        }

        req = match payload {
            Payload::Empty => req,
            Payload::Json(body) => req.json(body),
            Payload::Multipart(form) => req.multipart(form),
        };

        debug!("{} {}", method, full_url);

        let response = req.send().await.map_err(|e| self.map_transport_error(e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !(200..300).contains(&status) {
            warn!("{} {} answered with HTTP {}", method, full_url, status);
        }

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }

    fn map_transport_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(error)
        }
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn get(&self, url: &str, query: &Params) -> Result<ApiResponse> {
        self.send(Method::GET, url, Some(query), Payload::Empty).await
    }

    async fn post(&self, url: &str, body: &JsonValue, files: &Files) -> Result<ApiResponse> {
        let payload = if files.is_empty() {
            Payload::Json(body)
        } else {
            Payload::Multipart(multipart_form(body, files).await?)
        };
        self.send(Method::POST, url, None, payload).await
    }

    async fn patch(&self, url: &str, body: &JsonValue) -> Result<ApiResponse> {
        self.send(Method::PATCH, url, None, Payload::Json(body)).await
    }

    async fn put(&self, url: &str, body: &JsonValue) -> Result<ApiResponse> {
        self.send(Method::PUT, url, None, Payload::Json(body)).await
    }

    async fn delete(&self, url: &str) -> Result<ApiResponse> {
        self.send(Method::DELETE, url, None, Payload::Empty).await
    }

    fn scheme_and_host(&self) -> Option<String> {
        let base = Url::parse(self.config.base_url.as_deref()?).ok()?;
        Some(format!("{}://{}", base.scheme(), base.host_str()?))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Build a multipart form: body fields as text parts, files read from disk
async fn multipart_form(body: &JsonValue, files: &Files) -> Result<Form> {
    let mut form = Form::new();

    if let JsonValue::Object(fields) = body {
        for (name, value) in fields {
            form = form.text(name.clone(), scalar_to_string(value));
        }
    }

    for (name, path) in files {
        let contents = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| name.clone(), |n| n.to_string_lossy().into_owned());
        form = form.part(name.clone(), Part::bytes(contents).file_name(file_name));
    }

    Ok(form)
}
