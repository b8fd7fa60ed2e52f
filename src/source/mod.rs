//! Page source module
//!
//! The fetch capability injected into a
//! [`PaginationController`](crate::pagination::PaginationController).
//!
//! # Overview
//!
//! A [`PageSource`] answers two questions: "what is the first page?" and
//! "what is the page after this cursor?". [`HttpPageSource`] answers them
//! against a configured REST backend; tests and embedders can supply their
//! own implementation.

mod decode;
mod http;

pub use decode::PageDecoder;
pub use http::HttpPageSource;

use crate::error::FetchError;
use crate::pagination::Page;
use async_trait::async_trait;

/// Backend capable of producing pages of `T`
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// Fetch the first page of the feed
    async fn fetch_first_page(&self) -> Result<Page<T>, FetchError>;

    /// Fetch the page that follows `cursor`
    async fn fetch_next_page(&self, cursor: &str) -> Result<Page<T>, FetchError>;
}
