//! Web-Scraper: single-page fetch and content extraction
//!
//! This crate fetches one web page and extracts structured content from it,
//! optionally scoped by a CSS selector. Results and failures are reported
//! through a uniform `{success, data|error}` envelope so the scrape can be
//! exposed as a named remote operation.

pub mod config;
pub mod scrape;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for scrape operations
///
/// Every variant is terminal for the call that raised it. Callers branch on
/// [`ScrapeError::kind`] rather than on message text.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{message}")]
    Network { url: String, message: String },

    #[error("Failed to parse document: {0}")]
    Parse(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Discriminant of a [`ScrapeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidUrl,
    NetworkError,
    ParseError,
    InvalidSelector,
}

impl ScrapeError {
    /// Returns the kind of failure this error represents
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            Self::Network { .. } => ErrorKind::NetworkError,
            Self::Parse(_) => ErrorKind::ParseError,
            Self::InvalidSelector { .. } => ErrorKind::InvalidSelector,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::scrape::{extract, Envelope, ExtractionResult, Fetcher, ScrapeRequest, WebScraper};
pub use crate::url::validate_target_url;
