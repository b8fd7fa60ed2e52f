//! Pagination module
//!
//! Cursor-driven incremental loading of a feed.
//!
//! # Overview
//!
//! [`PaginationController`] owns the accumulated items, the most recent
//! continuation [`Cursor`] and the current [`Phase`]. It talks to the backend
//! only through an injected [`crate::source::PageSource`] and guarantees that
//! at most one fetch is in flight at any time:
//!
//! ```text
//!          load_initial()                     load_more(), cursor present
//!   Idle ─────────────────▶ LoadingInitial    Idle ─────────────────▶ LoadingMore
//!    ▲                           │             ▲                          │
//!    └──── success | failure ────┘             └──── success | failure ───┘
//! ```
//!
//! Every other trigger is a no-op reported as [`LoadOutcome::Skipped`].

mod controller;
mod types;

pub use controller::PaginationController;
pub use types::{Cursor, LoadOutcome, Page, Phase, SkipReason, Status};
