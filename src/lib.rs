// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # feed-pager
//!
//! Cursor-paginated feed loading with at-most-one-in-flight semantics.
//!
//! ## Features
//!
//! - **Pagination Controller**: initial load, "load more", three exclusive loading phases
//! - **Injected Sources**: any backend implementing [`source::PageSource`]
//! - **HTTP Source**: configurable REST endpoints, cursor in query or body
//! - **Teardown Safety**: results arriving after teardown never touch state
//! - **View Model**: spinner / load-more / end-of-feed derived from controller state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use feed_pager::{load_config, FeedSession, HttpPageSource, StaticIdentity};
//!
//! #[tokio::main]
//! async fn main() -> feed_pager::Result<()> {
//!     let config = load_config("feed.yaml")?;
//!     let source = HttpPageSource::from_config(&config)?;
//!     let session = FeedSession::new(source, StaticIdentity::anonymous());
//!
//!     session.mount().await?;
//!     while session.controller().has_more() {
//!         session.load_more().await?;
//!     }
//!
//!     for post in session.view().items {
//!         println!("{}", post.post_id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 FeedSession  →  FeedView                     │
//! └───────────────┬───────────────────────────────┬──────────────┘
//!                 │                               │
//! ┌───────────────┴──────────────┐   ┌────────────┴─────────────┐
//! │     PaginationController     │   │     IdentityProvider     │
//! │  Idle │ LoadingInitial │ More│   │   Static │ Http          │
//! └───────────────┬──────────────┘   └────────────┬─────────────┘
//!                 │ PageSource                    │
//! ┌───────────────┴───────────────────────────────┴──────────────┐
//! │          HttpClient (rate limit, optional retry)             │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Feed configuration
pub mod config;

/// HTTP client with rate limiting
pub mod http;

/// Cursor pagination controller
pub mod pagination;

/// Injected fetch capability
pub mod source;

/// Viewer identity
pub mod identity;

/// Feed session and view model
pub mod feed;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, FetchError, Result};
pub use types::*;

pub use config::{load_config, load_config_from_str, FeedConfig};
pub use feed::{FeedSession, FeedView};
pub use identity::{HttpIdentityProvider, Identity, IdentityProvider, StaticIdentity};
pub use pagination::{Cursor, LoadOutcome, Page, PaginationController, Phase, Status};
pub use source::{HttpPageSource, PageSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
