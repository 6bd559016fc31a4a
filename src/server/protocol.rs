//! Wire types for the line-delimited request protocol

use crate::config::ServerConfig;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Name of the scrape operation
pub const SCRAPE_METHOD: &str = "scrape";

/// Name of the introspection operation
pub const DESCRIBE_METHOD: &str = "describe";

/// One incoming request line
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Caller-chosen correlation id, echoed back unchanged
    #[serde(default)]
    pub id: Value,

    pub method: String,

    #[serde(default)]
    pub params: Value,
}

/// One outgoing response line
///
/// Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub id: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn result(id: Value, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Describes the server and the parameters of its operations
pub fn describe(info: &ServerConfig) -> Value {
    json!({
        "name": info.name,
        "version": info.version,
        "description": info.description,
        "functions": [scrape_function()],
    })
}

fn scrape_function() -> Value {
    json!({
        "name": SCRAPE_METHOD,
        "description": "Scrape content from a website URL",
        "parameters": {
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL of the website to scrape"
                },
                "selector": {
                    "type": "string",
                    "description": "Optional CSS selector to target specific elements"
                }
            },
            "required": ["url"]
        }
    })
}
