use serde::Deserialize;

/// Browser-like user agent sent with every fetch
///
/// Some servers reject or alter responses for clients that do not look like
/// a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Web-Scraper
///
/// Every section and field is optional; missing values fall back to
/// defaults so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Identity advertised by the request server
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server name
    pub name: String,

    /// Server version
    pub version: String,

    /// Human-readable description
    pub description: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "web-scraper".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "MCP server for web scraping".to_string(),
        }
    }
}
