//! Identity module
//!
//! Resolves who is looking at the feed. The pagination controller never
//! depends on this; the feed view uses it to decide whether
//! post-composition affordances are shown.
//!
//! - [`StaticIdentity`] hands out a fixed identity
//! - [`HttpIdentityProvider`] looks the user up with a stored auth token

mod provider;
mod types;

pub use provider::{HttpIdentityProvider, IdentityProvider, StaticIdentity};
pub use types::Identity;

#[cfg(test)]
mod tests;
