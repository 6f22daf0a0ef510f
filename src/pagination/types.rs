//! Pagination types
//!
//! Page envelopes, request shapes and the parameter validation shared by
//! the paginator and the resource layer.

use crate::error::{Error, Result};
use crate::types::{JsonValue, Params};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Query parameter carrying the page number
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "limit";

/// One page of a collection plus the size of the whole collection.
///
/// Deserialized from a HAL envelope:
///
/// ```json
/// { "total": 3, "_embedded": { "items": [ ... ] } }
/// ```
///
/// A missing or null `total` reads as 0, and missing or null items as an
/// empty page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HalPage", into = "HalPage")]
pub struct PageEnvelope {
    /// Number of records across all pages
    pub total: u64,
    /// Records of this page, in server order
    pub items: Vec<JsonValue>,
}

impl PageEnvelope {
    /// Create an envelope
    pub fn new(total: u64, items: Vec<JsonValue>) -> Self {
        Self { total, items }
    }

    /// Read an envelope from a decoded response body
    pub fn from_value(value: JsonValue) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::decode(format!(
                "Expected a page envelope object, got: {value}"
            )));
        }
        serde_json::from_value(value)
            .map_err(|e| Error::decode(format!("Invalid page envelope: {e}")))
    }
}

/// `null` reads the same as an absent field
#[derive(Serialize, Deserialize)]
struct HalPage {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default, rename = "_embedded")]
    embedded: Option<Embedded>,
}

#[derive(Serialize, Deserialize)]
struct Embedded {
    #[serde(default, deserialize_with = "one_or_many")]
    items: Vec<JsonValue>,
}

/// XML bodies collapse a single `<items>` element into an object
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::Array(items) => items,
        JsonValue::Null => Vec::new(),
        single => vec![single],
    })
}

impl From<HalPage> for PageEnvelope {
    fn from(page: HalPage) -> Self {
        Self {
            total: page.total.unwrap_or_default(),
            items: page.embedded.map(|e| e.items).unwrap_or_default(),
        }
    }
}

impl From<PageEnvelope> for HalPage {
    fn from(page: PageEnvelope) -> Self {
        Self {
            total: Some(page.total),
            embedded: Some(Embedded { items: page.items }),
        }
    }
}

/// Query and URI parameters identifying one paginated request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestShape {
    /// Query parameters (page, limit, filters)
    pub query: Params,
    /// URI template parameters
    pub uri: Params,
}

impl RequestShape {
    /// Create a shape
    pub fn new(query: Params, uri: Params) -> Self {
        Self { query, uri }
    }

    /// Cache key; equal for equal shapes
    pub fn key(&self) -> RequestKey {
        let query: serde_json::Map<String, JsonValue> = self.query.clone().into_iter().collect();
        let uri: serde_json::Map<String, JsonValue> = self.uri.clone().into_iter().collect();
        RequestKey(format!(
            "{}{}",
            JsonValue::Object(query),
            JsonValue::Object(uri)
        ))
    }
}

/// Canonical serialization of a [`RequestShape`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey(String);

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read a positive integer parameter, falling back to `default` when it is
/// absent or null. Strings, floats and other JSON types are rejected.
pub fn positive_int(params: &Params, field: &str, default: u64) -> Result<u64> {
    match params.get(field) {
        None | Some(JsonValue::Null) => Ok(default),
        Some(JsonValue::Number(n)) => match n.as_u64() {
            Some(v) if v >= 1 => Ok(v),
            Some(_) => Err(Error::invalid_argument(field, "must be at least 1")),
            None if n.is_i64() => Err(Error::invalid_argument(field, "must be at least 1")),
            None => Err(Error::invalid_argument(
                field,
                format!("must be an integer, got {n}"),
            )),
        },
        Some(other) => Err(Error::invalid_argument(
            field,
            format!("must be an integer, got {other}"),
        )),
    }
}
