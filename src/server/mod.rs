//! Request server
//!
//! Exposes the scrape as a named remote operation over line-delimited JSON.
//! Each input line is one request and produces exactly one output line:
//!
//! ```text
//! → {"id": 1, "method": "scrape", "params": {"url": "https://example.com", "selector": "h1"}}
//! ← {"id": 1, "result": {"success": true, "data": {...}}}
//! ```

mod protocol;

pub use protocol::{describe, Request, Response, DESCRIBE_METHOD, SCRAPE_METHOD};

use crate::config::ServerConfig;
use crate::scrape::{Envelope, ScrapeRequest, WebScraper};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Dispatches protocol requests to a [`WebScraper`]
#[derive(Debug, Clone)]
pub struct Server {
    scraper: WebScraper,
    info: ServerConfig,
}

impl Server {
    pub fn new(scraper: WebScraper, info: ServerConfig) -> Self {
        Self { scraper, info }
    }

    /// Serves requests until `reader` reaches EOF
    ///
    /// Requests are handled one at a time, in arrival order.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("Starting {} {}", self.info.name, self.info.version);

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let mut encoded = serde_json::to_string(&response)?;
            encoded.push('\n');
            writer.write_all(encoded.as_bytes()).await?;
            writer.flush().await?;
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handles one raw input line
    ///
    /// Returns `None` for blank lines.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                tracing::warn!("Rejected malformed request: {}", e);
                Response::error(Value::Null, format!("Invalid request: {}", e))
            }
        };

        Some(response)
    }

    /// Handles one decoded request
    pub async fn handle_request(&self, request: Request) -> Response {
        tracing::debug!("Handling '{}' request (id {})", request.method, request.id);

        match request.method.as_str() {
            SCRAPE_METHOD => {
                let envelope = match serde_json::from_value::<ScrapeRequest>(request.params) {
                    Ok(params) => self.scraper.handle(&params).await,
                    Err(e) => Envelope::Failure(format!("Invalid parameters: {}", e)),
                };

                match serde_json::to_value(&envelope) {
                    Ok(result) => Response::result(request.id, result),
                    Err(e) => Response::error(request.id, format!("Failed to encode result: {}", e)),
                }
            }
            DESCRIBE_METHOD => Response::result(request.id, describe(&self.info)),
            other => Response::error(request.id, format!("Unknown method: {}", other)),
        }
    }
}
