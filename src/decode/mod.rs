//! Response decoder module
//!
//! Supports: JSON, XML
//!
//! # Overview
//!
//! Bodies are decoded into `serde_json::Value` according to the response
//! media type. Anything that is neither JSON nor XML is rejected with
//! [`Error::InvalidResponseFormat`](crate::Error::InvalidResponseFormat)
//! carrying the status and raw body.

mod decoders;
mod types;

pub use decoders::{decode_response, JsonDecoder, XmlDecoder};
pub use types::{BodyDecoder, BodyFormat};
