//! Bridge between a paginator and the API that serves the pages
//!
//! The paginator asks for the total first and the items second, for the
//! same request shape. [`ApiAdapter`] keeps the most recent envelope fetched
//! by [`ResultAdapter::number_of_results`] so the second call is served
//! without another request.

use super::cache::SingleSlotCache;
use super::types::{PageEnvelope, RequestShape};
use crate::error::Result;
use crate::types::{JsonValue, Params};
use async_trait::async_trait;
use futures::future::{self, BoxFuture, FutureExt};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Something that can fetch one page of a collection
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page described by `query` (which carries `page` and
    /// `limit`) from the collection addressed by `uri`
    async fn get_paginated(&self, query: &Params, uri: &Params) -> Result<PageEnvelope>;
}

/// Uniform `(number_of_results, results)` view over a [`PageSource`]
#[async_trait]
pub trait ResultAdapter: Send + Sync {
    /// Total number of records for the request shape
    async fn number_of_results(&self, query: &Params, uri: &Params) -> Result<u64>;

    /// Pending records of the requested page. The returned future owns
    /// everything it needs and can outlive the adapter borrow.
    fn results_pending(&self, query: Params, uri: Params)
        -> BoxFuture<'static, Result<Vec<JsonValue>>>;

    /// Records of the requested page
    async fn results(&self, query: &Params, uri: &Params) -> Result<Vec<JsonValue>> {
        self.results_pending(query.clone(), uri.clone()).await
    }
}

/// [`ResultAdapter`] over a [`PageSource`] with a single-slot cache.
///
/// Only `number_of_results` fills the slot. `results` reuses an entry for
/// the same shape but leaves the slot alone on a miss.
pub struct ApiAdapter {
    source: Arc<dyn PageSource>,
    cache: Mutex<SingleSlotCache<Arc<PageEnvelope>>>,
}

impl ApiAdapter {
    /// Create an adapter with an empty cache
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(SingleSlotCache::new()),
        }
    }

    /// Forget the cached envelope
    pub fn invalidate(&self) {
        self.lock().invalidate();
    }

    fn lock(&self) -> MutexGuard<'_, SingleSlotCache<Arc<PageEnvelope>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ResultAdapter for ApiAdapter {
    async fn number_of_results(&self, query: &Params, uri: &Params) -> Result<u64> {
        let shape = RequestShape::new(query.clone(), uri.clone());
        let key = shape.key();

        let cached = self.lock().get(&key);
        if let Some(envelope) = cached {
            debug!("Page envelope cache hit for {}", key);
            return Ok(envelope.total);
        }

        let envelope = Arc::new(self.source.get_paginated(query, uri).await?);
        let total = envelope.total;
        self.lock().insert(key, envelope);

        Ok(total)
    }

    fn results_pending(
        &self,
        query: Params,
        uri: Params,
    ) -> BoxFuture<'static, Result<Vec<JsonValue>>> {
        let shape = RequestShape::new(query, uri);

        if let Some(envelope) = self.lock().get(&shape.key()) {
            return future::ready(Ok(envelope.items.clone())).boxed();
        }

        let source = Arc::clone(&self.source);
        async move {
            let envelope = source.get_paginated(&shape.query, &shape.uri).await?;
            Ok(envelope.items)
        }
        .boxed()
    }
}

impl std::fmt::Debug for ApiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiAdapter")
            .field("cached_key", &self.lock().key().cloned())
            .finish_non_exhaustive()
    }
}
