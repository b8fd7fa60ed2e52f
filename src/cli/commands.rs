//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cursor-paginated feed loader
#[derive(Parser, Debug)]
#[command(name = "feed-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Feed configuration file (YAML)
    #[arg(short, long, global = true, default_value = "feed.yaml")]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate the feed configuration
    Validate,

    /// Fetch the feed: first page, then up to N more pages
    Fetch {
        /// Additional pages to load after the first one
        #[arg(long, default_value = "0")]
        pages: usize,

        /// Pretty-print each message instead of one JSON object per line
        #[arg(long)]
        pretty: bool,
    },
}
