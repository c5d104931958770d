//! REST client implementation
//!
//! This module implements the JSON-over-HTTP transport used by the booking
//! service. Every endpoint answers with a `{status, message, data}` envelope;
//! the client unwraps transport-level failures into [`ApiError`] and hands
//! the envelope to the caller.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, Response as ReqwestResponse};

use crate::models::ApiEnvelope;
use crate::session::TokenStore;
use crate::{ApiError, Result};

/// Environment variable holding the service base URL
pub const ENV_API_URL: &str = "VOYAGE_API_URL";

/// Environment variable holding the request timeout in seconds
pub const ENV_API_TIMEOUT_SECS: &str = "VOYAGE_API_TIMEOUT_SECS";

// =============================================================================
// Client Configuration
// =============================================================================

/// Endpoint paths, relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// Location listing
    pub locations: String,
    /// Transport mode listing
    pub transportation_modes: String,
    /// Booking creation (POST) and history (GET)
    pub bookings: String,
    /// Credential login
    pub login: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            locations: "/locations".to_string(),
            transportation_modes: "/transportation-modes".to_string(),
            bookings: "/bookings".to_string(),
            login: "/auth/login".to_string(),
        }
    }
}

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base service URL (e.g., "http://localhost:3000/api")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
    /// Endpoint paths
    pub endpoints: ApiEndpoints,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Cosmic-Voyage/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
            endpoints: ApiEndpoints::default(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Build a config from `VOYAGE_API_URL` and `VOYAGE_API_TIMEOUT_SECS`
    ///
    /// Unset variables fall back to the defaults; a timeout that is not a
    /// whole number of seconds is rejected.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|url| !url.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_API_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::InvalidConfig(format!(
                    "{} must be whole seconds, got {:?}",
                    ENV_API_TIMEOUT_SECS, raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Replace the endpoint paths
    pub fn with_endpoints(mut self, endpoints: ApiEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Join an endpoint path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// REST response
///
/// Envelope plus the HTTP status and headers it arrived with.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lowercased names)
    pub headers: HashMap<String, String>,
    /// Response envelope
    pub envelope: ApiEnvelope<T>,
}

impl<T> ApiResponse<T> {
    /// Get a header value
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.get(&key.to_ascii_lowercase())
    }
}

/// Envelope as it appears on the wire; every field is optional
#[derive(Debug, Deserialize)]
struct WireEnvelope<T> {
    status: Option<u16>,
    #[serde(alias = "msg")]
    message: Option<String>,
    data: Option<T>,
}

// =============================================================================
// REST Client Implementation
// =============================================================================

/// HTTP client for the booking service
///
/// # Examples
/// ```
/// use api_client::{ApiClientConfig, RestClient};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::new(ApiClientConfig::new("http://localhost:3000/api"))?;
///     let envelope = client.get::<serde_json::Value>("/locations").await?.envelope;
///     println!("status {}", envelope.status);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    /// HTTP client
    client: ReqwestClient,
    /// Configuration
    config: ApiClientConfig,
    /// Session tokens attached to outgoing requests
    tokens: Arc<TokenStore>,
}

impl RestClient {
    /// Create a new client with its own, empty token store
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        Self::with_tokens(config, Arc::new(TokenStore::new()))
    }

    /// Create a new client sharing an existing token store
    pub fn with_tokens(config: ApiClientConfig, tokens: Arc<TokenStore>) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    /// Make a GET request
    pub async fn get<T>(&self, path: &str) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        self.execute(Method::GET, path, None).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Execute a request
    async fn execute<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        tracing::debug!("{} {}", method, url);

        let mut req = self.client.request(method, &url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        if let Some(token) = self.tokens.access_token() {
            req = req.bearer_auth(token);
        }

        if let Some(body) = body {
            req = req.header("Content-Type", "application/json").body(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Request to {} failed: {}", url, e)))?;

        self.parse_response(response).await
    }

    /// Parse reqwest response into an ApiResponse
    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(key.as_str().to_ascii_lowercase(), value_str.to_string());
            }
        }

        let http_success = response.status().is_success();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;

        if !http_success {
            let message = match serde_json::from_str::<WireEnvelope<serde_json::Value>>(&body) {
                Ok(wire) => wire.message,
                Err(_) if body.trim().is_empty() => None,
                Err(_) => Some(format!("HTTP {}: {}", status, body)),
            };
            tracing::warn!("HTTP {} from booking service", status);
            return Err(ApiError::Api { status, message });
        }

        // An empty 2xx body is an envelope-less success
        let envelope = if body.trim().is_empty() {
            ApiEnvelope {
                status,
                message: None,
                data: None,
            }
        } else {
            let wire: WireEnvelope<T> = serde_json::from_str(&body)?;
            ApiEnvelope {
                status: wire.status.unwrap_or(status),
                message: wire.message,
                data: wire.data,
            }
        };

        Ok(ApiResponse {
            status,
            headers,
            envelope,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Get the shared token store
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }
}

// =============================================================================
// Tests
// =============================================================================
