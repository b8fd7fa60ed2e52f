//! Common types used throughout feed-pager
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Items
// ============================================================================

/// A feed entry with a stable identity.
///
/// The pagination controller never looks at items at all; the identity is
/// only used by consumers (routing on selection, keyed rendering).
pub trait Item {
    /// Unique identifier of this item
    fn item_id(&self) -> &str;
}

/// A post as returned by the feed backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Identifier taken from the configured id field
    pub post_id: String,
    /// The full record as received, untouched
    pub payload: JsonValue,
}

impl Post {
    /// Create a post from its identifier and raw record
    pub fn new(post_id: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            post_id: post_id.into(),
            payload,
        }
    }
}

impl Item for Post {
    fn item_id(&self) -> &str {
        &self.post_id
    }
}

impl Item for String {
    fn item_id(&self) -> &str {
        self
    }
}

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method used for a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
        }
    }
}

/// Where the continuation cursor travels on a next-page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorLocation {
    /// As a query parameter
    Query,
    /// As a field of a JSON request body
    #[default]
    Body,
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy for transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
