//! HTTP transport module
//!
//! Provides the HTTP client used by page sources and identity lookups.
//!
//! # Features
//!
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Optional Retries**: Bounded retry with constant, linear or exponential backoff
//! - **Error Classification**: Transport failures map onto [`crate::error::FetchError`]

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
