//! Decoder types and traits

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// `application/json` and `+json` media types
    Json,
    /// `application/xml` and `text/xml`
    Xml,
}

impl BodyFormat {
    /// Pick a format from a media type (`type/subtype`, no parameters)
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "application/json" => Some(Self::Json),
            "application/xml" | "text/xml" => Some(Self::Xml),
            other if other.starts_with("application/") && other.ends_with("+json") => {
                Some(Self::Json)
            }
            _ => None,
        }
    }
}

/// Trait for turning a response body into a JSON value
pub trait BodyDecoder: Send + Sync {
    /// Decode the whole body
    fn decode(&self, body: &str) -> Result<Value>;
}
