//! Pagination module
//!
//! Page-number pagination over HAL collections.
//!
//! # Overview
//!
//! A [`Paginator`] walks the pages of one request shape. It talks to the API
//! through a [`ResultAdapter`], which turns a [`PageSource`] into a
//! `(number_of_results, results)` pair and keeps the last envelope it fetched
//! so that both values come from a single request.

mod adapter;
mod cache;
mod concurrent;
mod factory;
mod paginator;
mod types;

pub use adapter::{ApiAdapter, PageSource, ResultAdapter};
pub use cache::SingleSlotCache;
pub use concurrent::fetch_ordered;
pub use factory::{AdapterFactory, ApiAdapterFactory, DefaultPaginatorFactory, PaginatorFactory};
pub use paginator::{Paginator, DEFAULT_LIMIT};
pub use types::{positive_int, PageEnvelope, RequestKey, RequestShape, LIMIT_PARAM, PAGE_PARAM};
