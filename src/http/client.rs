//! HTTP client for the data-transport API
//!
//! Provides a thin HTTP client that handles:
//! - API key and bearer token headers
//! - Cancellation through an [`AbortSignal`]
//! - Error classification (network, API, aborted)
//!
//! The client never retries. List views recover through the pagination
//! controller, and writes are not idempotent on the remote side.

use super::abort::AbortSignal;
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "apiKey";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout enforced by the transport
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("cfp-console/{}", env!("CARGO_PKG_VERSION")),
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

    /// Send the API key header on every request
    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.header(API_KEY_HEADER, key)
    }

    /// Send a bearer token on every request
    pub fn bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header("Authorization", value)
    }

    /// Add a default header
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

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter when a value is present
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Structured error body returned by the API
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// HTTP client bound to one API base URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Make a GET request
    pub async fn get(
        &self,
        url: &str,
        config: RequestConfig,
        signal: &AbortSignal,
    ) -> Result<Response> {
        self.request(Method::GET, url, config, signal).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put(&self, url: &str, config: RequestConfig) -> Result<Response> {
        self.request(Method::PUT, url, config, &AbortSignal::never())
            .await
    }

    /// Make a generic request
    ///
    /// Non-success statuses become [`Error::Api`]; transport failures become
    /// [`Error::Network`]; an abort before the response arrives becomes
    /// [`Error::Aborted`].
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
        signal: &AbortSignal,
    ) -> Result<Response> {
        if signal.is_aborted() {
            return Err(Error::Aborted);
        }

        let full_url = self.build_url(url);
        let mut req = self.client.request(method.clone(), &full_url);

        // Add default headers
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add request-specific headers
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add query parameters
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        // Add body
        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }

        let response = tokio::select! {
            biased;
            () = signal.aborted() => {
                debug!("Request aborted: {} {}", method, full_url);
                return Err(Error::Aborted);
            }
            result = req.send() => result.map_err(Error::Network)?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = tokio::select! {
                biased;
                () = signal.aborted() => return Err(Error::Aborted),
                body = response.text() => body.unwrap_or_default(),
            };
            warn!("Request failed with {}: {} {}", status.as_u16(), method, full_url);
            return Err(api_error(status, &body));
        }

        debug!("Request succeeded: {} {}", method, full_url);
        Ok(response)
    }

    /// Read a JSON response body, honouring the abort signal
    pub async fn read_json<T: DeserializeOwned>(
        response: Response,
        signal: &AbortSignal,
    ) -> Result<T> {
        let bytes = tokio::select! {
            biased;
            () = signal.aborted() => return Err(Error::Aborted),
            bytes = response.bytes() => bytes.map_err(Error::Network)?,
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Make a request and parse JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
        signal: &AbortSignal,
    ) -> Result<T> {
        let response = self.request(method, url, config, signal).await?;
        Self::read_json(response, signal).await
    }

    /// Make a GET request and parse JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
        signal: &AbortSignal,
    ) -> Result<T> {
        self.request_json(Method::GET, url, config, signal).await
    }

    /// Make a PUT request and parse JSON response
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        self.request_json(Method::PUT, url, config, &AbortSignal::never())
            .await
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

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

/// Map a failed response to an API error
fn api_error(status: StatusCode, body: &str) -> Error {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let reason = status.canonical_reason().unwrap_or("Unknown");

    let code = parsed.code.unwrap_or_else(|| reason.to_string());
    let message = match (parsed.message, parsed.detail) {
        (Some(message), Some(detail)) if !detail.is_empty() => format!("{message} ({detail})"),
        (Some(message), _) => message,
        (None, Some(detail)) => detail,
        (None, None) if !body.trim().is_empty() => body.trim().to_string(),
        (None, None) => reason.to_string(),
    };

    Error::api(status.as_u16(), code, message)
}
