//! Configuration module for Web-Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use web_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Requests time out after {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, ServerConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, parse_config};
