//! URI module
//!
//! Maps logical resource names to URI templates and renders those templates
//! with URI parameters.

mod map;
mod template;

pub use map::{ArrayUriMap, UriMap};
pub use template::UriTemplate;
