//! Logical resource name → URI template mapping

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves a logical resource name (`products`) to a URI template
pub trait UriMap: Send + Sync {
    /// URI template for `resource`
    fn uri_for(&self, resource: &str) -> Result<String>;
}

/// In-memory [`UriMap`].
///
/// With `allow_default_uris` an unmapped resource name is used as its own
/// URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayUriMap {
    /// Explicit mappings
    #[serde(default)]
    pub mapping: HashMap<String, String>,
    /// Fall back to the resource name for unmapped resources
    #[serde(default = "default_true")]
    pub allow_default_uris: bool,
}

fn default_true() -> bool {
    true
}

impl ArrayUriMap {
    /// Create a map
    pub fn new(mapping: HashMap<String, String>, allow_default_uris: bool) -> Self {
        Self {
            mapping,
            allow_default_uris,
        }
    }

    /// Add or replace one mapping
    #[must_use]
    pub fn with(mut self, resource: impl Into<String>, uri: impl Into<String>) -> Self {
        self.mapping.insert(resource.into(), uri.into());
        self
    }
}

impl UriMap for ArrayUriMap {
    fn uri_for(&self, resource: &str) -> Result<String> {
        if resource.is_empty() {
            return Err(Error::invalid_argument(
                "resource",
                "The resource has to be string and cannot be empty.",
            ));
        }
        if let Some(uri) = self.mapping.get(resource) {
            return Ok(uri.clone());
        }
        if self.allow_default_uris {
            return Ok(resource.to_string());
        }
        Err(Error::UnknownResource {
            resource: resource.to_string(),
        })
    }
}
