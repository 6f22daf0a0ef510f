//! Page cursor over one request shape
//!
//! The paginator learns the collection size from the first page it fetches,
//! so [`Paginator::has_next_page`] and [`Paginator::number_of_results`] are
//! only answerable after a call to [`Paginator::current_page_results`].

use super::adapter::ResultAdapter;
use super::types::{positive_int, LIMIT_PARAM, PAGE_PARAM};
use crate::error::{Error, Result};
use crate::types::{JsonValue, Params};
use std::sync::Arc;
use tracing::debug;

/// Page size used when the caller does not set `limit`
pub const DEFAULT_LIMIT: u64 = 10;

/// Cursor over the pages of one `(query, uri)` request
pub struct Paginator {
    adapter: Arc<dyn ResultAdapter>,
    /// Query parameters without `page`; `limit` always set
    query: Params,
    uri: Params,
    limit: u64,
    current_page: u64,
    last_page: Option<u64>,
    total_results: Option<u64>,
    cached_page: Option<Vec<JsonValue>>,
}

impl Paginator {
    /// Create a paginator positioned on `query["page"]` (default 1).
    ///
    /// `limit` defaults to [`DEFAULT_LIMIT`]. Both `limit` and `page` must be
    /// JSON integers of at least 1; anything else fails with
    /// [`Error::InvalidArgument`] before any request is made.
    pub fn new(adapter: Arc<dyn ResultAdapter>, mut query: Params, uri: Params) -> Result<Self> {
        let limit = positive_int(&query, LIMIT_PARAM, DEFAULT_LIMIT)?;
        let current_page = positive_int(&query, PAGE_PARAM, 1)?;

        query.insert(LIMIT_PARAM.to_string(), limit.into());
        query.remove(PAGE_PARAM);

        Ok(Self {
            adapter,
            query,
            uri,
            limit,
            current_page,
            last_page: None,
            total_results: None,
            cached_page: None,
        })
    }

    /// Records of the current page, fetched once and kept until the cursor
    /// moves
    pub async fn current_page_results(&mut self) -> Result<&[JsonValue]> {
        if self.cached_page.is_none() {
            let items = self.fetch_current_page().await?;
            self.cached_page = Some(items);
        }
        Ok(self.cached_page.as_deref().unwrap_or_default())
    }

    async fn fetch_current_page(&mut self) -> Result<Vec<JsonValue>> {
        let query = self.page_query(self.current_page);
        debug!(
            page = self.current_page,
            limit = self.limit,
            "Fetching page"
        );

        // Both calls target the same shape; the adapter answers the second
        // from the envelope fetched by the first
        let total = self.adapter.number_of_results(&query, &self.uri).await?;
        let items = self.adapter.results(&query, &self.uri).await?;

        self.total_results = Some(total);
        self.last_page = Some(total.div_ceil(self.limit));

        Ok(items)
    }

    /// Move to the next page
    pub fn next_page(&mut self) -> Result<()> {
        if !self.has_next_page()? {
            return Err(Error::logic("There is no next page."));
        }
        self.current_page += 1;
        self.cached_page = None;
        Ok(())
    }

    /// Move to the previous page
    pub fn previous_page(&mut self) -> Result<()> {
        if !self.has_previous_page() {
            return Err(Error::logic("There is no previous page."));
        }
        self.current_page -= 1;
        self.cached_page = None;
        Ok(())
    }

    /// Whether a page precedes the current one
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a page follows the current one. Needs a prior fetch.
    pub fn has_next_page(&self) -> Result<bool> {
        self.last_page
            .map(|last| self.current_page < last)
            .ok_or_else(|| Error::logic("The number of pages is unknown until a page has been fetched."))
    }

    /// Total number of records. Needs a prior fetch.
    pub fn number_of_results(&self) -> Result<u64> {
        self.total_results
            .ok_or_else(|| Error::logic("The number of results is unknown until a page has been fetched."))
    }

    /// Current page number, starting at 1
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Page size
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// `ceil(total / limit)`, once known
    pub fn last_page(&self) -> Option<u64> {
        self.last_page
    }

    /// Query parameters with `page` set to `page`
    pub fn page_query(&self, page: u64) -> Params {
        let mut query = self.query.clone();
        query.insert(PAGE_PARAM.to_string(), page.into());
        query
    }

    /// URI template parameters sent with every page request
    pub fn uri_parameters(&self) -> &Params {
        &self.uri
    }

    /// The adapter this paginator fetches through
    pub fn adapter(&self) -> Arc<dyn ResultAdapter> {
        Arc::clone(&self.adapter)
    }
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("query", &self.query)
            .field("uri", &self.uri)
            .field("current_page", &self.current_page)
            .field("last_page", &self.last_page)
            .field("total_results", &self.total_results)
            .field("cached", &self.cached_page.is_some())
            .finish_non_exhaustive()
    }
}
