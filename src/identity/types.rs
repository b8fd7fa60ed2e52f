//! Identity types

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// The viewer of a feed session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Auth token the user was resolved with
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// User record returned by the backend
    pub user: Option<JsonValue>,
    /// Whether the user is authenticated
    pub is_auth: bool,
}

impl Identity {
    /// An unauthenticated viewer
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated viewer
    pub fn authenticated(token: impl Into<String>, user: JsonValue) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
            is_auth: true,
        }
    }
}
