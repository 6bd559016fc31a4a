//! HTML extractor
//!
//! This module turns a fetched body into one of four result shapes:
//! - No selector → a page summary (title, description, body text)
//! - Selector with zero matches → an explicit empty result
//! - Selector with one match → that element's text and inner markup
//! - Selector with two or more matches → a list, in document order
//!
//! Parsing is lenient: `scraper` builds the tree with html5ever, which
//! recovers from unknown tags and broken nesting the way browsers do. Those
//! recoveries are logged and never abort extraction.

use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Number of body characters kept in a page summary
pub const BODY_TEXT_LIMIT: usize = 1000;

/// Suffix always appended to the summary body text
pub const BODY_TEXT_SUFFIX: &str = "...";

/// Number of leading characters inspected when sniffing for binary content
const BINARY_SNIFF_LEN: usize = 1024;

/// Message reported when a selector matches nothing
pub const NO_MATCH_MESSAGE: &str = "No elements found matching the provided selector";

/// Text and inner markup of one matched element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementMatch {
    /// Trimmed text content
    pub text: String,

    /// Serialized inner markup
    pub html: String,
}

/// Result of a single extraction
///
/// Consumers branch on which fields are present, so each variant serializes
/// to its own flat object with no discriminant field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    /// One selector match
    SingleMatch {
        url: String,
        selector: String,
        text: String,
        html: String,
    },

    /// Two or more selector matches
    MultiMatch {
        url: String,
        selector: String,
        count: usize,
        results: Vec<ElementMatch>,
    },

    /// Selector matched nothing
    NoMatch {
        url: String,
        selector: String,
        count: usize,
        message: String,
    },

    /// No selector supplied
    PageSummary {
        url: String,
        title: String,
        description: String,
        #[serde(rename = "bodyText")]
        body_text: String,
    },
}

impl ExtractionResult {
    /// The URL the result was extracted from
    pub fn url(&self) -> &str {
        match self {
            Self::SingleMatch { url, .. }
            | Self::MultiMatch { url, .. }
            | Self::NoMatch { url, .. }
            | Self::PageSummary { url, .. } => url,
        }
    }

    /// Number of matched elements, or `None` for a page summary
    pub fn match_count(&self) -> Option<usize> {
        match self {
            Self::SingleMatch { .. } => Some(1),
            Self::MultiMatch { count, .. } | Self::NoMatch { count, .. } => Some(*count),
            Self::PageSummary { .. } => None,
        }
    }
}

/// Extracts content from an HTML body
///
/// An empty or whitespace-only `selector` is treated the same as no selector.
///
/// # Arguments
///
/// * `url` - The page URL, echoed into the result
/// * `body` - The raw response body
/// * `selector` - Optional CSS selector
///
/// # Returns
///
/// * `Ok(ExtractionResult)` - One of the four result shapes
/// * `Err(ScrapeError::Parse)` - The body is not markup
/// * `Err(ScrapeError::InvalidSelector)` - The selector does not parse
///
/// # Example
///
/// ```
/// use web_scraper::scrape::extract;
///
/// let html = "<html><body><h1>A</h1><h1>B</h1></body></html>";
/// let result = extract("https://example.com", html, Some("h1")).unwrap();
/// assert_eq!(result.match_count(), Some(2));
/// ```
pub fn extract(
    url: &str,
    body: &str,
    selector: Option<&str>,
) -> crate::Result<ExtractionResult> {
    // Compile the selector first so a bad expression fails without parsing the body
    let selector = match selector.filter(|s| !s.trim().is_empty()) {
        Some(raw) => Some((raw, compile_selector(raw)?)),
        None => None,
    };

    let document = parse_document(body)?;

    let result = match selector {
        Some((raw, compiled)) => select_elements(url, raw, &document, &compiled),
        None => summarize_page(url, &document),
    };

    Ok(result)
}

/// Parses a selector expression
fn compile_selector(raw: &str) -> crate::Result<Selector> {
    Selector::parse(raw).map_err(|e| ScrapeError::InvalidSelector {
        selector: raw.to_string(),
        message: e.to_string(),
    })
}

/// Parses a body into a document tree
///
/// Stray NULs inside markup are left to html5ever, which replaces them with
/// U+FFFD. Only bodies that look like binary content are rejected.
fn parse_document(body: &str) -> crate::Result<Html> {
    if looks_binary(body) {
        return Err(ScrapeError::Parse(
            "body contains binary data and is not HTML".to_string(),
        ));
    }

    let document = Html::parse_document(body);

    if !document.errors.is_empty() {
        tracing::warn!(
            "Recovered from {} markup error(s) while parsing",
            document.errors.len()
        );
    }

    Ok(document)
}

/// Returns true when a body is binary rather than markup
///
/// A body is binary when it has NULs and either no `<` at all or a sample
/// where more than 30% of the characters are non-whitespace control characters.
fn looks_binary(body: &str) -> bool {
    if !body.contains('\0') {
        return false;
    }

    if !body.contains('<') {
        return true;
    }

    let sample: Vec<char> = body.chars().take(BINARY_SNIFF_LEN).collect();
    let control = sample
        .iter()
        .filter(|c| c.is_control() && !c.is_whitespace())
        .count();

    control * 10 > sample.len() * 3
}

/// Dispatches on match cardinality
fn select_elements(url: &str, raw: &str, document: &Html, selector: &Selector) -> ExtractionResult {
    let mut matches: Vec<ElementMatch> = document.select(selector).map(element_match).collect();

    match matches.len() {
        0 => ExtractionResult::NoMatch {
            url: url.to_string(),
            selector: raw.to_string(),
            count: 0,
            message: NO_MATCH_MESSAGE.to_string(),
        },
        1 => {
            let ElementMatch { text, html } = matches.remove(0);
            ExtractionResult::SingleMatch {
                url: url.to_string(),
                selector: raw.to_string(),
                text,
                html,
            }
        }
        count => ExtractionResult::MultiMatch {
            url: url.to_string(),
            selector: raw.to_string(),
            count,
            results: matches,
        },
    }
}

fn element_match(element: ElementRef<'_>) -> ElementMatch {
    ElementMatch {
        text: trimmed_text(element),
        html: element.inner_html(),
    }
}

/// Builds the default summary used when no selector is given
fn summarize_page(url: &str, document: &Html) -> ExtractionResult {
    let title = first_match(document, "title")
        .map(trimmed_text)
        .unwrap_or_default();

    let description = first_match(document, r#"meta[name="description"]"#)
        .and_then(|meta| meta.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    let body_text = first_match(document, "body")
        .map(trimmed_text)
        .unwrap_or_default();

    ExtractionResult::PageSummary {
        url: url.to_string(),
        title,
        description,
        body_text: truncate_body_text(&body_text),
    }
}

/// Keeps the first [`BODY_TEXT_LIMIT`] characters and appends the suffix
///
/// The suffix is appended even when nothing was cut. Callers rely on this
/// fixed format, so short pages also end in `...`.
pub fn truncate_body_text(text: &str) -> String {
    let mut truncated: String = text.chars().take(BODY_TEXT_LIMIT).collect();
    truncated.push_str(BODY_TEXT_SUFFIX);
    truncated
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
