//! Decoder implementations
//!
//! Each decoder handles a specific response format.

use super::types::{BodyDecoder, BodyFormat};
use crate::error::{Error, Result};
use crate::http::ApiResponse;
use serde_json::{Map, Value};
use tracing::debug;

/// Decode a response body according to its content type.
///
/// `204 No Content` decodes to `null`. An unsupported or missing content type
/// fails with [`Error::InvalidResponseFormat`].
pub fn decode_response(response: &ApiResponse) -> Result<Value> {
    if response.is_no_content() {
        return Ok(Value::Null);
    }

    let format = response
        .media_type()
        .as_deref()
        .and_then(BodyFormat::from_media_type)
        .ok_or_else(|| {
            Error::invalid_format(
                response.status,
                response.content_type.clone(),
                response.text(),
            )
        })?;

    debug!("Decoding {:?} body ({} bytes)", format, response.body.len());

    let body = response.text();
    match format {
        BodyFormat::Json => JsonDecoder.decode(&body),
        BodyFormat::Xml => XmlDecoder.decode(&body),
    }
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl BodyDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })
    }
}

// ============================================================================
// XML Decoder
// ============================================================================

/// XML decoder producing a JSON tree.
///
/// The document element is unwrapped: `<r><total>3</total></r>` decodes to
/// `{"total": 3}`. Repeated child elements become arrays, attributes are
/// ignored, and numeric or boolean text is coerced.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDecoder;

impl BodyDecoder for XmlDecoder {
    fn decode(&self, body: &str) -> Result<Value> {
        xml_to_json(body)
    }
}

fn xml_error(message: impl Into<String>) -> Error {
    Error::XmlParse {
        message: message.into(),
    }
}

fn xml_to_json(xml: &str) -> Result<Value> {
    let mut xml = xml.trim();

    // Skip XML declarations and processing instructions
    while let Some(rest) = xml.strip_prefix("<?") {
        let end = rest
            .find("?>")
            .ok_or_else(|| xml_error("Unterminated XML declaration"))?;
        xml = rest[end + 2..].trim_start();
    }

    if !xml.starts_with('<') {
        return Err(xml_error("Input does not appear to be XML"));
    }

    parse_xml_element(xml).map(|(_, value, _)| value)
}

/// Parse the element starting at `input` (which begins with `<`).
///
/// Returns the tag name, its JSON value, and the input after its closing tag.
fn parse_xml_element(input: &str) -> Result<(&str, Value, &str)> {
    let open_end = input
        .find('>')
        .ok_or_else(|| xml_error("Malformed tag"))?;
    let open_tag = &input[1..open_end];
    let self_closing = open_tag.ends_with('/');
    let tag_name = open_tag
        .trim_end_matches('/')
        .split_whitespace()
        .next()
        .ok_or_else(|| xml_error("Empty tag name"))?;
    let after_open = &input[open_end + 1..];

    if self_closing {
        return Ok((tag_name, Value::Null, after_open));
    }

    let close_tag = format!("</{tag_name}>");
    let mut children = Map::new();
    let mut text = String::new();
    let mut current = after_open;

    loop {
        let pos = current
            .find('<')
            .ok_or_else(|| xml_error(format!("Missing closing tag for {tag_name}")))?;
        text.push_str(&current[..pos]);
        current = &current[pos..];

        if let Some(rest) = current.strip_prefix(close_tag.as_str()) {
            let value = if children.is_empty() {
                let text = text.trim();
                if text.is_empty() {
                    Value::Null
                } else {
                    parse_text_value(&unescape(text))
                }
            } else {
                Value::Object(children)
            };
            return Ok((tag_name, value, rest));
        }

        if current.starts_with("</") {
            return Err(xml_error(format!("Unexpected closing tag inside {tag_name}")));
        }

        let (child_tag, child_value, rest) = parse_xml_element(current)?;

        // Repeated elements collapse into an array
        match children.get_mut(child_tag) {
            Some(Value::Array(arr)) => arr.push(child_value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, child_value]);
            }
            None => {
                children.insert(child_tag.to_string(), child_value);
            }
        }

        current = rest;
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Parse text content into appropriate JSON value
fn parse_text_value(text: &str) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        return Value::Number(n.into());
    }

    if let Ok(n) = text.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }

    match text.to_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    Value::String(text.to_string())
}
