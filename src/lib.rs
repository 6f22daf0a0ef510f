// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # hal-api
//!
//! Async client for HAL-style REST APIs: resource CRUD, page-number
//! pagination and whole-collection reads.
//!
//! ## Features
//!
//! - **Resource façades**: get, create, update and delete against URI
//!   templates such as `products/{productId}/variants`
//! - **Pagination**: a cursor over `{ total, _embedded: { items } }` pages
//!   backed by a single-slot result cache
//! - **Aggregation**: fetch every page sequentially, or with bounded
//!   concurrency while keeping page order
//! - **Body decoding**: JSON and XML responses
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hal_api::api::ResourceApi;
//! use hal_api::http::HttpClient;
//! use hal_api::{params, Params, Result};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Arc::new(HttpClient::from_url("https://shop.example.com/api/")?);
//!     let variants = ResourceApi::new(client, "products/{productId}/variants")?;
//!
//!     let uri = params([("productId", 3)]);
//!     let all = variants.get_all(&Params::new(), &uri).await?;
//!
//!     let mut paginator = variants.create_paginator(&Params::new(), &uri)?;
//!     let first = paginator.current_page_results().await?;
//!     println!("{} of {}", first.len(), paginator.number_of_results()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │        ResourceApi / CheckoutApi   (ApiResolver, UriMap)     │
//! │  get  get_paginated  get_all  get_all_concurrent  create ... │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                           │
//! ┌───────────────┴─────────────┐ ┌───────────┴─────────────────┐
//! │ Pagination                  │ │ Decode                      │
//! │ Paginator → ResultAdapter   │ │ JSON / XML → serde_json     │
//! │ → PageSource (single slot)  │ │                             │
//! └─────────────────────────────┘ └─────────────────────────────┘
//!                 │
//! ┌───────────────┴─────────────────────────────────────────────┐
//! │ HTTP: ApiClient → HttpClient (reqwest, governor)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP transport with rate limiting
pub mod http;

/// Response body decoders (JSON, XML)
pub mod decode;

/// URI templates and resource maps
pub mod uri;

/// Paginator, result adapter and aggregation helpers
pub mod pagination;

/// Resource façades
pub mod api;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::{ApiResolver, CheckoutApi, ResourceApi};
pub use config::{load_config, load_config_from_str, ClientConfig};
pub use pagination::{PageEnvelope, Paginator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
