//! HTTP-backed page source

use super::decode::PageDecoder;
use super::PageSource;
use crate::config::{EndpointConfig, FeedConfig, NextPageConfig};
use crate::error::FetchError;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::Page;
use crate::types::{CursorLocation, Post};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Page source for a REST feed endpoint pair
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Arc<HttpClient>,
    first_page: EndpointConfig,
    next_page: NextPageConfig,
    decoder: PageDecoder,
}

impl HttpPageSource {
    /// Create a source from its parts
    pub fn new(
        client: Arc<HttpClient>,
        first_page: EndpointConfig,
        next_page: NextPageConfig,
        decoder: PageDecoder,
    ) -> Self {
        Self {
            client,
            first_page,
            next_page,
            decoder,
        }
    }

    /// Create a source sharing `client`, shaped by `config`
    pub fn with_client(client: Arc<HttpClient>, config: &FeedConfig) -> Self {
        Self::new(
            client,
            config.first_page.clone(),
            config.next_page.clone(),
            PageDecoder::from_config(&config.response),
        )
    }

    /// Create a source with its own HTTP client
    pub fn from_config(config: &FeedConfig) -> Result<Self, FetchError> {
        let client = HttpClient::with_config(config.http_client_config())?;
        Ok(Self::with_client(Arc::new(client), config))
    }

    fn next_page_request(&self, cursor: &str) -> RequestConfig {
        let param = &self.next_page.cursor_param;
        match self.next_page.cursor_in {
            CursorLocation::Query => RequestConfig::new().query(param, cursor),
            CursorLocation::Body => {
                let mut body = Map::new();
                body.insert(param.clone(), Value::String(cursor.to_string()));
                RequestConfig::new().json(Value::Object(body))
            }
        }
    }

    /// Whether a failed next-page response is the backend refusing the cursor
    fn is_cursor_rejection(&self, status: u16, body: &str) -> bool {
        if !matches!(status, 400 | 404 | 410 | 422) {
            return false;
        }
        let body = body.to_ascii_lowercase();
        body.contains("cursor") || body.contains(&self.next_page.cursor_param.to_ascii_lowercase())
    }
}

#[async_trait]
impl PageSource<Post> for HttpPageSource {
    async fn fetch_first_page(&self) -> Result<Page<Post>, FetchError> {
        debug!(path = %self.first_page.path, "fetching first page");
        let body = self
            .client
            .request_json(
                self.first_page.method.into(),
                &self.first_page.path,
                &RequestConfig::new(),
            )
            .await?;
        self.decoder.decode(&body)
    }

    async fn fetch_next_page(&self, cursor: &str) -> Result<Page<Post>, FetchError> {
        debug!(path = %self.next_page.path, cursor, "fetching next page");
        let request = self.next_page_request(cursor);
        let body = match self
            .client
            .request_json(self.next_page.method.into(), &self.next_page.path, &request)
            .await
        {
            Ok(body) => body,
            Err(FetchError::Server { status, body }) if self.is_cursor_rejection(status, &body) => {
                return Err(FetchError::invalid_cursor(cursor, body));
            }
            Err(e) => return Err(e),
        };
        self.decoder.decode(&body)
    }
}
