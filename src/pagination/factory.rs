//! Factories used by the resource layer to build adapters and paginators

use super::adapter::{ApiAdapter, PageSource, ResultAdapter};
use super::paginator::Paginator;
use crate::error::Result;
use crate::types::Params;
use std::sync::Arc;

/// Builds a [`ResultAdapter`] over a page source
pub trait AdapterFactory: Send + Sync {
    fn create(&self, source: Arc<dyn PageSource>) -> Arc<dyn ResultAdapter>;
}

/// Builds a [`Paginator`] over an adapter
pub trait PaginatorFactory: Send + Sync {
    fn create(
        &self,
        adapter: Arc<dyn ResultAdapter>,
        query: Params,
        uri: Params,
    ) -> Result<Paginator>;
}

/// Produces a fresh [`ApiAdapter`] with an empty cache on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiAdapterFactory;

impl AdapterFactory for ApiAdapterFactory {
    fn create(&self, source: Arc<dyn PageSource>) -> Arc<dyn ResultAdapter> {
        Arc::new(ApiAdapter::new(source))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPaginatorFactory;

impl PaginatorFactory for DefaultPaginatorFactory {
    fn create(
        &self,
        adapter: Arc<dyn ResultAdapter>,
        query: Params,
        uri: Params,
    ) -> Result<Paginator> {
        Paginator::new(adapter, query, uri)
    }
}
