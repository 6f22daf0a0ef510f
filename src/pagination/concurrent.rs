//! Bounded, ordered concurrent fetching

use crate::error::{Error, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

/// Run `fetch` for every input with at most `concurrency` calls in flight.
///
/// Outputs come back in input order no matter which call finishes first.
/// The first error stops the run and drops the calls still pending.
pub async fn fetch_ordered<I, T, F, Fut>(inputs: I, concurrency: usize, fetch: F) -> Result<Vec<T>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if concurrency == 0 {
        return Err(Error::invalid_argument(
            "concurrency",
            "must be at least 1",
        ));
    }

    stream::iter(inputs)
        .map(fetch)
        .buffered(concurrency)
        .try_collect()
        .await
}
