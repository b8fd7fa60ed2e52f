//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, FeedConfig};
use crate::error::{Result, ResultExt};
use crate::feed::FeedSession;
use crate::http::HttpClient;
use crate::identity::{HttpIdentityProvider, IdentityProvider, StaticIdentity};
use crate::pagination::{LoadOutcome, PaginationController};
use crate::source::HttpPageSource;
use crate::types::Post;
use serde_json::{json, Value};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
    out: Mutex<Box<dyn Write + Send>>,
}

impl Runner {
    /// Create a runner writing messages to stdout
    pub fn new(cli: Cli) -> Self {
        Self::with_output(cli, io::stdout())
    }

    /// Create a runner writing messages to `out`
    pub fn with_output(cli: Cli, out: impl Write + Send + 'static) -> Self {
        Self {
            cli,
            out: Mutex::new(Box::new(out)),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Validate => self.validate(),
            Commands::Fetch { pages, pretty } => self.fetch(*pages, *pretty).await,
        }
    }

    fn load_config(&self) -> Result<FeedConfig> {
        load_config(&self.cli.config)
            .with_context(|| format!("Failed to load {}", self.cli.config.display()))
    }

    /// Validate the feed configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;

        self.output_message(
            &json!({
                "type": "LOG",
                "log": {
                    "level": "INFO",
                    "message": format!("Feed config for '{}' is valid", config.base_url)
                }
            }),
            false,
        )
    }

    /// Mount a session and load up to `pages` pages after the first
    async fn fetch(&self, pages: usize, pretty: bool) -> Result<()> {
        let config = self.load_config()?;
        let client = Arc::new(HttpClient::with_config(config.http_client_config())?);
        let source = HttpPageSource::with_client(Arc::clone(&client), &config);
        let session = FeedSession::from_parts(
            PaginationController::new(source),
            identity_provider(&config, client),
        );
        let start = Instant::now();

        let outcome = session.mount().await?;
        self.emit_page(&outcome, pretty)?;

        let mut loaded = 0;
        while loaded < pages && session.controller().has_more() {
            let outcome = session.load_more().await?;
            self.emit_page(&outcome, pretty)?;
            loaded += 1;
        }
        debug!(pages = loaded + 1, "fetch finished");

        let view = session.view();
        self.output_message(
            &json!({
                "type": "SUMMARY",
                "summary": {
                    "items": view.items.len(),
                    "has_more": session.controller().has_more(),
                    "footer": view.footer,
                    "can_compose": view.can_compose,
                    "duration_ms": start.elapsed().as_millis() as u64,
                }
            }),
            pretty,
        )?;

        session.unmount();
        Ok(())
    }

    fn emit_page(&self, outcome: &LoadOutcome<Post>, pretty: bool) -> Result<()> {
        let Some(page) = outcome.page() else {
            return Ok(());
        };
        for post in &page.items {
            self.output_message(
                &json!({
                    "type": "ITEM",
                    "item": {
                        "id": post.post_id,
                        "route": crate::feed::item_route(&post.post_id),
                        "data": post.payload,
                    }
                }),
                pretty,
            )?;
        }
        Ok(())
    }

    /// Write one message, compact JSON per line unless `pretty`
    fn output_message(&self, msg: &Value, pretty: bool) -> Result<()> {
        let line = if pretty {
            serde_json::to_string_pretty(msg)?
        } else {
            serde_json::to_string(msg)?
        };
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}

fn identity_provider(config: &FeedConfig, client: Arc<HttpClient>) -> Arc<dyn IdentityProvider> {
    match &config.identity {
        Some(identity) => Arc::new(HttpIdentityProvider::from_config(client, identity)),
        None => Arc::new(StaticIdentity::anonymous()),
    }
}
