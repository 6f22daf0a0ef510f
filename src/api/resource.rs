//! Resource façade: CRUD and paginated reads for one URI template

use crate::decode::decode_response;
use crate::error::{Error, Result};
use crate::http::{ApiClient, ApiResponse};
use crate::pagination::{
    fetch_ordered, AdapterFactory, ApiAdapterFactory, DefaultPaginatorFactory, PageEnvelope,
    PageSource, Paginator, PaginatorFactory, DEFAULT_LIMIT, LIMIT_PARAM, PAGE_PARAM,
};
use crate::types::{Files, JsonValue, Params};
use crate::uri::UriTemplate;
use async_trait::async_trait;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

use super::object::ApiObject;

/// Page size used by [`ResourceApi::get_all`] unless the caller sets `limit`
pub const GET_ALL_LIMIT: u64 = 100;

/// Operations on one collection of resources
#[derive(Clone)]
pub struct ResourceApi {
    client: Arc<dyn ApiClient>,
    uri: UriTemplate,
    adapter_factory: Arc<dyn AdapterFactory>,
    paginator_factory: Arc<dyn PaginatorFactory>,
}

impl ResourceApi {
    /// Create a façade for the collection at `uri` (may contain `{param}`
    /// placeholders)
    pub fn new(client: Arc<dyn ApiClient>, uri: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            uri: UriTemplate::new(uri)?,
            adapter_factory: Arc::new(ApiAdapterFactory),
            paginator_factory: Arc::new(DefaultPaginatorFactory),
        })
    }

    /// Replace the factories used by the paginated reads
    #[must_use]
    /// Replace the adapter and paginator factories
    pub fn with_factories(
        mut self,
        adapter_factory: Arc<dyn AdapterFactory>,
        paginator_factory: Arc<dyn PaginatorFactory>,
    ) -> Self {
        self.adapter_factory = adapter_factory;
        self.paginator_factory = paginator_factory;
        self
    }

    /// Collection URI template
    pub fn uri(&self) -> &UriTemplate {
        &self.uri
    }

    pub fn client(&self) -> &Arc<dyn ApiClient> {
        &self.client
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Fetch a single resource, sending `query` as the query string
    pub async fn get(&self, id: impl Display, query: &Params, uri: &Params) -> Result<JsonValue> {
        let url = self.uri.render_item(id, uri)?;
        let response = self.client.get(&url, query).await?;
        read_body(&url, &response)
    }

    /// Fetch one page. `page` defaults to 1 and `limit` to 10.
    pub async fn get_paginated(&self, query: &Params, uri: &Params) -> Result<PageEnvelope> {
        let mut query = query.clone();
        query.entry(PAGE_PARAM.to_string()).or_insert(1.into());
        query
            .entry(LIMIT_PARAM.to_string())
            .or_insert(DEFAULT_LIMIT.into());

        let url = self.uri.render(uri)?;
        let response = self.client.get(&url, &query).await?;
        PageEnvelope::from_value(read_body(&url, &response)?)
    }

    /// Paginator over this collection with a fresh adapter
    pub fn create_paginator(&self, query: &Params, uri: &Params) -> Result<Paginator> {
        let adapter = self.adapter_factory.create(Arc::new(self.clone()));
        self.paginator_factory
            .create(adapter, query.clone(), uri.clone())
    }

    /// Fetch every record of the collection, one page after another.
    ///
    /// Starts from `query["page"]` (default 1) with `limit` defaulting to
    /// [`GET_ALL_LIMIT`]. Any failed page aborts the whole call.
    pub async fn get_all(&self, query: &Params, uri: &Params) -> Result<Vec<JsonValue>> {
        let mut paginator = self.create_paginator(&with_get_all_limit(query), uri)?;

        let mut results = paginator.current_page_results().await?.to_vec();
        while paginator.has_next_page()? {
            paginator.next_page()?;
            results.extend_from_slice(paginator.current_page_results().await?);
        }

        debug!(uri = %self.uri, records = results.len(), "Fetched all pages");
        Ok(results)
    }

    /// Like [`ResourceApi::get_all`], but fetches the pages after the first
    /// with up to `concurrency` requests in flight. Records keep page order.
    pub async fn get_all_concurrent(
        &self,
        query: &Params,
        uri: &Params,
        concurrency: usize,
    ) -> Result<Vec<JsonValue>> {
        if concurrency == 0 {
            return Err(Error::invalid_argument(
                "concurrency",
                "must be at least 1",
            ));
        }

        let mut paginator = self.create_paginator(&with_get_all_limit(query), uri)?;
        let mut results = paginator.current_page_results().await?.to_vec();

        let first = paginator.current_page();
        let last = paginator.last_page().unwrap_or(first);
        if last <= first {
            return Ok(results);
        }

        debug!(
            uri = %self.uri,
            pages = last - first,
            concurrency,
            "Fetching remaining pages"
        );

        let adapter = paginator.adapter();
        let pages = fetch_ordered(first + 1..=last, concurrency, |page| {
            adapter.results_pending(paginator.page_query(page), uri.clone())
        })
        .await?;

        results.extend(pages.into_iter().flatten());
        Ok(results)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Create a resource. With `files` the request is sent as multipart.
    pub async fn create(&self, body: &JsonValue, uri: &Params, files: &Files) -> Result<JsonValue> {
        let url = self.uri.render(uri)?;
        let response = self.client.post(&url, body, files).await?;
        read_body(&url, &response)
    }

    /// Update a resource. Sends `PATCH`, or a multipart `POST` when `files`
    /// is not empty. True iff the server answers `204 No Content`.
    pub async fn update(
        &self,
        id: impl Display,
        body: &JsonValue,
        uri: &Params,
        files: &Files,
    ) -> Result<bool> {
        let url = self.uri.render_item(id, uri)?;
        let response = if files.is_empty() {
            self.client.patch(&url, body).await?
        } else {
            self.client.post(&url, body, files).await?
        };
        Ok(accepted(&url, &response))
    }

    /// Delete a resource. True iff the server answers `204 No Content`.
    pub async fn delete(&self, id: impl Display, uri: &Params) -> Result<bool> {
        let url = self.uri.render_item(id, uri)?;
        let response = self.client.delete(&url).await?;
        Ok(accepted(&url, &response))
    }

    /// Create `object`, or update it when it already has an id. A created
    /// object takes the `id` of the returned resource.
    pub async fn save(&self, object: &mut ApiObject) -> Result<bool> {
        let body = object.body();
        match object.id().cloned() {
            Some(id) => {
                let id = crate::types::scalar_to_string(&id);
                self.update(id, &body, object.uri_parameters(), object.files())
                    .await
            }
            None => {
                let created = self
                    .create(&body, object.uri_parameters(), object.files())
                    .await?;
                match created.get("id") {
                    Some(id) if !id.is_null() => {
                        object.set_id(id.clone());
                        Ok(true)
                    }
                    _ => Ok(false),
                }
            }
        }
    }
}

#[async_trait]
impl PageSource for ResourceApi {
    async fn get_paginated(&self, query: &Params, uri: &Params) -> Result<PageEnvelope> {
        ResourceApi::get_paginated(self, query, uri).await
    }
}

impl std::fmt::Debug for ResourceApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceApi")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

fn with_get_all_limit(query: &Params) -> Params {
    let mut query = query.clone();
    query
        .entry(LIMIT_PARAM.to_string())
        .or_insert(GET_ALL_LIMIT.into());
    query
}

/// Decode a read response. The body is decoded whatever the status; a
/// non-success status is only logged.
fn read_body(url: &str, response: &ApiResponse) -> Result<JsonValue> {
    if !response.is_success() {
        warn!(url, status = response.status, "Request did not succeed");
    }
    decode_response(response)
}

fn accepted(url: &str, response: &ApiResponse) -> bool {
    if !response.is_no_content() {
        debug!(url, status = response.status, "Write not accepted");
    }
    response.is_no_content()
}
