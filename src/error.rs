//! Error types for feed-pager
//!
//! Two layers live here:
//! - [`FetchError`] is what a page source reports for a single fetch. The
//!   pagination controller surfaces it unchanged to its caller.
//! - [`Error`] is the crate-wide error for everything around the controller
//!   (configuration, IO, the CLI).

use thiserror::Error;

/// Failure of a single page fetch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure (unreachable host, timeout, broken connection)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Backend answered with a non-success status
    #[error("Server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    /// Response body could not be turned into a page
    #[error("Failed to decode page: {message}")]
    Decode { message: String },

    /// Backend rejected the continuation cursor
    #[error("Cursor '{cursor}' rejected: {message}")]
    InvalidCursor { cursor: String, message: String },
}

impl FetchError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid cursor error
    pub fn invalid_cursor(cursor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCursor {
            cursor: cursor.into(),
            message: message.into(),
        }
    }

    /// Whether a transport layer may retry the request that produced this error.
    ///
    /// The pagination controller never retries on its own; this only drives
    /// the optional bounded retry in [`crate::http::HttpClient`].
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network { .. } => true,
            FetchError::Server { status, .. } => is_retryable_status(*status),
            FetchError::Decode { .. } | FetchError::InvalidCursor { .. } => false,
        }
    }
}

/// The main error type for feed-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error(transparent)]
    Fetch(#[from] FetchError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for feed-pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
