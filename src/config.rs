//! Feed configuration
//!
//! Describes where the feed lives and how its pages are shaped, loaded from
//! YAML:
//!
//! ```yaml
//! base_url: https://api.example.com
//! first_page:
//!   method: GET
//!   path: /posts
//! next_page:
//!   method: POST
//!   path: /posts/next
//!   cursor_param: lastKey
//!   cursor_in: body
//! response:
//!   items_path: posts
//!   cursor_path: lastKey
//!   id_field: postId
//! identity:
//!   path: /users/me
//!   token_env: FEED_AUTH_TOKEN
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, CursorLocation, Method};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Feed Config
// ============================================================================

/// Complete feed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URL for API requests
    pub base_url: String,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Request for the first page
    #[serde(default = "default_first_page")]
    pub first_page: EndpointConfig,

    /// Request for continuation pages
    #[serde(default)]
    pub next_page: NextPageConfig,

    /// Where items and cursor live in a response
    #[serde(default)]
    pub response: ResponseConfig,

    /// Authenticated user lookup (absent = always anonymous)
    #[serde(default)]
    pub identity: Option<IdentityConfig>,
}

fn default_first_page() -> EndpointConfig {
    EndpointConfig {
        method: Method::GET,
        path: "/posts".to_string(),
    }
}

impl FeedConfig {
    /// Create a config with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: HttpConfig::default(),
            first_page: default_first_page(),
            next_page: NextPageConfig::default(),
            response: ResponseConfig::default(),
            identity: None,
        }
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        require_non_empty("first_page.path", &self.first_page.path)?;
        require_non_empty("next_page.path", &self.next_page.path)?;
        require_non_empty("next_page.cursor_param", &self.next_page.cursor_param)?;
        require_non_empty("response.items_path", &self.response.items_path)?;
        require_non_empty("response.cursor_path", &self.response.cursor_path)?;
        require_non_empty("response.id_field", &self.response.id_field)?;

        if self.next_page.method == Method::GET && self.next_page.cursor_in == CursorLocation::Body
        {
            return Err(Error::invalid_value(
                "next_page.cursor_in",
                "a GET request cannot carry the cursor in a body",
            ));
        }

        if let Some(limit) = &self.http.rate_limit {
            if limit.requests_per_second == 0 || limit.burst_size == 0 {
                return Err(Error::invalid_value(
                    "http.rate_limit",
                    "requests_per_second and burst_size must be positive",
                ));
            }
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be positive"));
        }

        if let Some(identity) = &self.identity {
            require_non_empty("identity.path", &identity.path)?;
        }

        Ok(())
    }

    /// Build the HTTP client configuration for this feed
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: Some(self.base_url.clone()),
            timeout: Duration::from_secs(self.http.timeout_secs),
            max_retries: self.http.max_retries,
            initial_backoff: Duration::from_millis(self.http.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.http.max_backoff_ms),
            backoff_type: self.http.backoff,
            rate_limit: self.http.rate_limit.clone(),
            default_headers: self.http.headers.clone(),
            ..HttpClientConfig::default()
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_value(field, "must not be empty"));
    }
    Ok(())
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Transport retries per request; the controller itself never retries
    #[serde(default)]
    pub max_retries: u32,

    /// Backoff strategy between transport retries
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Outbound rate limit (absent = unlimited)
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Headers added to every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            rate_limit: default_rate_limit(),
            headers: HashMap::new(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    10_000
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

// ============================================================================
// Endpoints
// ============================================================================

/// A single request endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// HTTP method
    #[serde(default)]
    pub method: Method,

    /// Path relative to the base URL
    pub path: String,
}

/// Continuation page request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPageConfig {
    /// HTTP method
    #[serde(default = "default_next_method")]
    pub method: Method,

    /// Path relative to the base URL
    #[serde(default = "default_next_path")]
    pub path: String,

    /// Name of the query parameter or body field carrying the cursor
    #[serde(default = "default_cursor_field")]
    pub cursor_param: String,

    /// Where the cursor is sent
    #[serde(default)]
    pub cursor_in: CursorLocation,
}

impl Default for NextPageConfig {
    fn default() -> Self {
        Self {
            method: default_next_method(),
            path: default_next_path(),
            cursor_param: default_cursor_field(),
            cursor_in: CursorLocation::default(),
        }
    }
}

fn default_next_method() -> Method {
    Method::POST
}

fn default_next_path() -> String {
    "/posts/next".to_string()
}

fn default_cursor_field() -> String {
    "lastKey".to_string()
}

// ============================================================================
// Response Shape
// ============================================================================

/// Where items and the next cursor are found in a page response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Dot path to the item array
    #[serde(default = "default_items_path")]
    pub items_path: String,

    /// Dot path to the next cursor
    #[serde(default = "default_cursor_field")]
    pub cursor_path: String,

    /// Field holding each item's identifier
    #[serde(default = "default_id_field")]
    pub id_field: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            items_path: default_items_path(),
            cursor_path: default_cursor_field(),
            id_field: default_id_field(),
        }
    }
}

fn default_items_path() -> String {
    "posts".to_string()
}

fn default_id_field() -> String {
    "postId".to_string()
}

// ============================================================================
// Identity
// ============================================================================

/// Authenticated user lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Path of the "current user" endpoint
    #[serde(default = "default_identity_path")]
    pub path: String,

    /// Environment variable holding the auth token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            path: default_identity_path(),
            token_env: default_token_env(),
        }
    }
}

impl IdentityConfig {
    /// Read the auth token from the configured environment variable.
    ///
    /// Empty values count as absent.
    pub fn token_from_env(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.is_empty())
    }
}

fn default_identity_path() -> String {
    "/users/me".to_string()
}

fn default_token_env() -> String {
    "FEED_AUTH_TOKEN".to_string()
}

// ============================================================================
// Loading
// ============================================================================

/// Parse and validate a feed config from YAML text
pub fn load_config_from_str(yaml: &str) -> Result<FeedConfig> {
    let config: FeedConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a feed config from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<FeedConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    load_config_from_str(&contents)
}
