//! Scrape module: fetch a page, then extract from it
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with a browser-like user agent
//! - HTML parsing and selector-based extraction
//! - Wrapping outcomes into the success/failure envelope

mod envelope;
mod extractor;
mod fetcher;

pub use envelope::Envelope;
pub use extractor::{
    extract, truncate_body_text, ElementMatch, ExtractionResult, BODY_TEXT_LIMIT,
    BODY_TEXT_SUFFIX, NO_MATCH_MESSAGE,
};
pub use fetcher::{build_http_client, Fetcher};

use crate::config::FetcherConfig;
use crate::ScrapeError;
use serde::Deserialize;

/// Parameters of one scrape call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeRequest {
    /// Page to fetch
    pub url: String,

    /// Optional CSS selector scoping the extraction
    #[serde(default)]
    pub selector: Option<String>,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>, selector: Option<String>) -> Self {
        Self {
            url: url.into(),
            selector,
        }
    }
}

/// Runs fetch then extract for each request
///
/// Holds no per-request state; concurrent calls only share the fetcher's
/// connection pool.
#[derive(Debug, Clone)]
pub struct WebScraper {
    fetcher: Fetcher,
}

impl WebScraper {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Builds a scraper with a freshly configured fetcher
    pub fn from_config(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(Fetcher::new(config)?))
    }

    /// Fetches `url` and extracts from it
    ///
    /// # Returns
    ///
    /// * `Ok(ExtractionResult)` - The extracted content
    /// * `Err(ScrapeError)` - The first failure from either stage
    pub async fn scrape(
        &self,
        url: &str,
        selector: Option<&str>,
    ) -> crate::Result<ExtractionResult> {
        let body = self.fetcher.fetch(url).await?;
        extract(url, &body, selector)
    }

    /// Handles one request and wraps the outcome in an [`Envelope`]
    ///
    /// Failures are logged and reported as `Failed to scrape <url>: <cause>`.
    pub async fn handle(&self, request: &ScrapeRequest) -> Envelope {
        match self.scrape(&request.url, request.selector.as_deref()).await {
            Ok(data) => {
                tracing::info!(
                    "Scraped {} ({})",
                    request.url,
                    describe_result(&data)
                );
                Envelope::Success(data)
            }
            Err(e) => {
                tracing::error!("Error scraping {}: {}", request.url, e);
                Envelope::Failure(failure_message(&request.url, &e))
            }
        }
    }
}

/// Formats a failure for the envelope
pub fn failure_message(url: &str, error: &ScrapeError) -> String {
    format!("Failed to scrape {}: {}", url, error)
}

fn describe_result(result: &ExtractionResult) -> String {
    match result.match_count() {
        Some(count) => format!("{} match(es)", count),
        None => "page summary".to_string(),
    }
}
