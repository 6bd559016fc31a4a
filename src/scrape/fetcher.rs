//! HTTP fetcher implementation
//!
//! This module handles the single GET request a scrape needs:
//! - Building one HTTP client with the configured user agent and timeouts
//! - Validating the target URL before any network activity
//! - Collapsing every transport failure into a network error

use crate::config::FetcherConfig;
use crate::url::validate_target_url;
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;

/// Fetches page bodies over HTTP
///
/// The client is built once and shared by every call, so connection pooling
/// is owned by the transport rather than by individual scrapes.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds a fetcher from configuration
    ///
    /// # Example
    ///
    /// ```
    /// use web_scraper::config::FetcherConfig;
    /// use web_scraper::scrape::Fetcher;
    ///
    /// let fetcher = Fetcher::new(&FetcherConfig::default()).unwrap();
    /// ```
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;

        Ok(Self { client })
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches the body of `url` as text
    ///
    /// # Request Flow
    ///
    /// 1. Validate `url` as an absolute http(s) URL
    ///    - If invalid → `InvalidUrl`, no request is sent
    /// 2. Send one GET request (redirects follow the client default)
    /// 3. Non-2xx status → `Network`
    /// 4. Read the full body; a truncated transfer → `Network`
    ///
    /// There are no retries.
    pub async fn fetch(&self, url: &str) -> crate::Result<String> {
        let target = validate_target_url(url).map_err(|e| ScrapeError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Fetching {}", target);

        let network_error = |e: reqwest::Error| ScrapeError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let final_url = response.url().to_string();
        let response = response.error_for_status().map_err(network_error)?;

        let body = response.text().await.map_err(network_error)?;

        tracing::debug!(
            "Fetched {} (status {}, final URL {}, {} bytes)",
            url,
            status.as_u16(),
            final_url,
            body.len()
        );

        Ok(body)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}
