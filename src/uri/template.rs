//! URI templates with `{param}` placeholders
//!
//! `parentUri/{parentId}/uri` rendered with `parentId = 2` gives
//! `parentUri/2/uri/`. Collection URIs always end with a slash so that an
//! item id can be appended directly. Parameter values and ids are
//! percent-encoded as single path segments.

use crate::error::{Error, Result};
use crate::types::{scalar_to_string, Params};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

/// Regex for matching placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Base whose path segment encoder is used for parameter values
static SEGMENT_BASE: LazyLock<Url> = LazyLock::new(|| Url::parse("segment:/").unwrap());

/// Percent-encode `value` so it stays one path segment (`a/b` -> `a%2Fb`)
fn encode_segment(value: &str) -> Result<String> {
    let mut url = SEGMENT_BASE.clone();
    url.path_segments_mut()
        .map_err(|()| Error::logic("Segment base URL cannot hold a path"))?
        .clear()
        .push(value);
    Ok(url.path().trim_start_matches('/').to_string())
}

/// A collection URI pattern for one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    template: String,
}

impl UriTemplate {
    /// Create a template, appending a trailing slash when missing
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let mut template = template.into();
        if template.trim().is_empty() {
            return Err(Error::invalid_argument(
                "uri",
                "You must specify uri for Api",
            ));
        }
        if !template.ends_with('/') {
            template.push('/');
        }
        Ok(Self { template })
    }

    /// The normalized template text
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Names of all placeholders, in order of appearance
    pub fn placeholders(&self) -> Vec<String> {
        PLACEHOLDER_REGEX
            .captures_iter(&self.template)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Render the collection URI. Every placeholder must have a parameter;
    /// parameters without a placeholder are ignored.
    pub fn render(&self, uri_parameters: &Params) -> Result<String> {
        let mut missing = Vec::new();
        let mut failure = None;

        let rendered = PLACEHOLDER_REGEX.replace_all(&self.template, |caps: &regex::Captures| {
            let name = &caps[1];
            match uri_parameters.get(name) {
                Some(value) => encode_segment(&scalar_to_string(value)).unwrap_or_else(|e| {
                    failure.get_or_insert(e);
                    String::new()
                }),
                None => {
                    missing.push(name.to_string());
                    caps[0].to_string()
                }
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }
        if missing.is_empty() {
            Ok(rendered.into_owned())
        } else {
            Err(Error::undefined_var(missing.join(", ")))
        }
    }

    /// Render the URI of a single item: collection URI followed by the
    /// encoded `id`
    pub fn render_item(&self, id: impl fmt::Display, uri_parameters: &Params) -> Result<String> {
        let collection = self.render(uri_parameters)?;
        Ok(format!("{collection}{}", encode_segment(&id.to_string())?))
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
