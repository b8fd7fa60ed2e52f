//! Pagination types
//!
//! Defines the cursor, page and phase values shared by the controller and
//! its page sources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Continuation token handed out by the backend.
///
/// On the wire an empty string means "no further pages". That sentinel is
/// mapped to [`Cursor::Exhausted`] at the boundary so nothing downstream has
/// to compare against `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cursor {
    /// No further pages
    #[default]
    Exhausted,
    /// Opaque token for the next page
    Token(String),
}

impl Cursor {
    /// Build a cursor from its wire representation
    pub fn from_wire(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Exhausted
        } else {
            Self::Token(value)
        }
    }

    /// The token to send for the next page, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Exhausted => None,
            Self::Token(token) => Some(token),
        }
    }

    /// Whether another page can be requested
    pub fn has_more(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// Wire representation (`""` when exhausted)
    pub fn as_wire(&self) -> &str {
        self.token().unwrap_or("")
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self::from_wire(value)
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self::from_wire(value)
    }
}

impl From<Option<String>> for Cursor {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Exhausted, Self::from_wire)
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        match cursor {
            Cursor::Exhausted => String::new(),
            Cursor::Token(token) => token,
        }
    }
}

/// One fetch result: an ordered batch of items plus the next cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in the order the backend returned them
    pub items: Vec<T>,
    /// Cursor for the page after this one
    pub next_cursor: Cursor,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, next_cursor: impl Into<Cursor>) -> Self {
        Self {
            items,
            next_cursor: next_cursor.into(),
        }
    }

    /// Whether this is the final page
    pub fn is_last(&self) -> bool {
        !self.next_cursor.has_more()
    }
}

/// Loading phase of a controller.
///
/// One field, three values: the controller can never report both kinds of
/// loading at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No fetch in flight
    #[default]
    Idle,
    /// First page is being fetched
    LoadingInitial,
    /// A continuation page is being fetched
    LoadingMore,
}

impl Phase {
    /// Check if no fetch is in flight
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if a fetch of either kind is in flight
    pub fn is_loading(&self) -> bool {
        !self.is_idle()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::LoadingInitial => "loading_initial",
            Self::LoadingMore => "loading_more",
        };
        f.write_str(name)
    }
}

/// Read-only snapshot of a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status<T> {
    /// All items loaded so far, in arrival order
    pub items: Vec<T>,
    /// Whether the backend handed out a cursor for another page
    pub has_more: bool,
    /// Current phase
    pub phase: Phase,
}

/// Why a load call returned without fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch is in flight
    InFlight(Phase),
    /// The cursor is exhausted
    Exhausted,
    /// The first page has already been applied
    AlreadyLoaded,
    /// The controller was torn down
    TornDown,
}

/// Result of a successful (non-failing) load call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<T> {
    /// A page was fetched and applied
    Loaded(Page<T>),
    /// Preconditions not met; no fetch was issued and state is unchanged
    Skipped(SkipReason),
    /// The fetch resolved after teardown; its result was dropped
    Discarded,
}

impl<T> LoadOutcome<T> {
    /// The applied page, if one was loaded
    pub fn page(&self) -> Option<&Page<T>> {
        match self {
            Self::Loaded(page) => Some(page),
            _ => None,
        }
    }

    /// Check if a page was applied
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Check if the call was a no-op
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}
