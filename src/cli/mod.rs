//! CLI module
//!
//! Command-line interface for loading a feed.
//!
//! # Commands
//!
//! - `validate` - Check a feed configuration
//! - `fetch` - Mount a feed session and page through it

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
