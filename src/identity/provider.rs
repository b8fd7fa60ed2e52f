//! Identity providers

use super::types::Identity;
use crate::config::IdentityConfig;
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Source of the current viewer's identity.
///
/// Resolution never fails: anything that goes wrong yields an anonymous
/// identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the current identity
    async fn current(&self) -> Identity;
}

/// Provider returning a fixed identity
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    identity: Identity,
}

impl StaticIdentity {
    /// Create a provider for `identity`
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    /// Create a provider for an anonymous viewer
    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current(&self) -> Identity {
        self.identity.clone()
    }
}

/// Provider that fetches the authenticated user from the backend
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: Arc<HttpClient>,
    path: String,
    token: Option<String>,
}

impl HttpIdentityProvider {
    /// Create a provider calling `path` with `token`
    pub fn new(client: Arc<HttpClient>, path: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            path: path.into(),
            token,
        }
    }

    /// Create a provider from config, reading the token from the environment
    pub fn from_config(client: Arc<HttpClient>, config: &IdentityConfig) -> Self {
        Self::new(client, config.path.clone(), config.token_from_env())
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn current(&self) -> Identity {
        let Some(token) = &self.token else {
            debug!("no auth token, viewing anonymously");
            return Identity::anonymous();
        };

        match self
            .client
            .get_json(&self.path, &RequestConfig::new().bearer(token))
            .await
        {
            Ok(user) => {
                debug!(path = %self.path, "authenticated user resolved");
                Identity::authenticated(token.clone(), user)
            }
            Err(e) => {
                warn!(error = %e, "failed to resolve authenticated user");
                Identity::anonymous()
            }
        }
    }
}
