//! URL handling module for Web-Scraper
//!
//! This module validates target addresses before any network activity.

use crate::{UrlError, UrlResult};
use url::Url;

/// Validates a caller-supplied target address
///
/// The input must be a well-formed absolute URL with an `http` or `https`
/// scheme and a host. Relative references are rejected since there is no
/// base to resolve them against.
///
/// # Arguments
///
/// * `input` - The raw URL string from the request
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The input cannot be fetched
///
/// # Examples
///
/// ```
/// use web_scraper::url::validate_target_url;
///
/// assert!(validate_target_url("https://example.com/page").is_ok());
/// assert!(validate_target_url("not-a-url").is_err());
/// ```
pub fn validate_target_url(input: &str) -> UrlResult<Url> {
    let url = Url::parse(input.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}
