//! HTTP transport module
//!
//! Thin verb-dispatch layer over `reqwest`.
//!
//! # Features
//!
//! - **Verb Dispatch**: GET/POST/PATCH/PUT/DELETE against a base URL
//! - **File Upload**: multipart bodies for POST requests with files
//! - **Rate Limiting**: Token bucket rate limiter using governor
//!
//! Every HTTP status is handed back as an [`ApiResponse`]; deciding what a
//! 400 or a 204 means is left to the resource layer.

mod client;
mod rate_limit;
mod response;

pub use client::{ApiClient, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use response::ApiResponse;
