//! Success/failure envelope returned to the calling shell

use crate::scrape::ExtractionResult;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Uniform wrapper around a scrape outcome
///
/// Serializes to `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`. Failures carry only a message,
/// never a structured error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Success(ExtractionResult),
    Failure(String),
}

impl Envelope {
    /// Returns true for a successful scrape
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The extraction result, if the scrape succeeded
    pub fn data(&self) -> Option<&ExtractionResult> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// The error message, if the scrape failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
