//! Raw HTTP response handed from the transport to the resource layer

use bytes::Bytes;
use serde_json::Value;

/// Status, content type and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Value of the `Content-Type` header, if any
    pub content_type: Option<String>,
    /// Raw body
    pub body: Bytes,
}

impl ApiResponse {
    /// Create a response from its parts
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// Create a JSON response
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(
            status,
            Some("application/json".to_string()),
            body.to_string().into_bytes(),
        )
    }

    /// Create an empty `204 No Content` response
    pub fn no_content() -> Self {
        Self::new(204, None, Bytes::new())
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the server answered `204 No Content`
    pub fn is_no_content(&self) -> bool {
        self.status == 204
    }

    /// Body as UTF-8 text (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Media type without parameters, lowercased (`application/json`)
    pub fn media_type(&self) -> Option<String> {
        self.content_type.as_deref().map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }
}
