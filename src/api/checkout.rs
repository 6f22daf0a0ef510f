//! Checkout steps
//!
//! Checkout endpoints are addressed by cart (`checkouts/addressing/{cartId}`)
//! and advanced with `PUT`; a step is accepted with `204 No Content`.

use super::resource::ResourceApi;
use crate::error::Result;
use crate::http::ApiClient;
use crate::types::{JsonValue, Params};
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

/// URI parameter that identifies the cart
pub const CART_ID_PARAM: &str = "cartId";

/// [`ResourceApi`] whose writes go through `PUT` on the step URI.
///
/// Reads are the plain resource reads, reachable through `Deref`.
#[derive(Debug, Clone)]
pub struct CheckoutApi {
    inner: ResourceApi,
}

impl CheckoutApi {
    pub fn new(client: Arc<dyn ApiClient>, uri: impl Into<String>) -> Result<Self> {
        Ok(Self {
            inner: ResourceApi::new(client, uri)?,
        })
    }

    /// Submit a checkout step. True iff the server answers `204`.
    pub async fn create(&self, body: &JsonValue, uri: &Params) -> Result<bool> {
        let url = self.inner.uri().render(uri)?;
        let response = self.inner.client().put(&url, body).await?;
        debug!(url = %url, status = response.status, "Checkout step submitted");
        Ok(response.is_no_content())
    }

    /// Submit a checkout step for the cart `id`
    pub async fn update(&self, id: impl Display, body: &JsonValue, uri: &Params) -> Result<bool> {
        let mut uri = uri.clone();
        uri.insert(CART_ID_PARAM.to_string(), id.to_string().into());
        self.create(body, &uri).await
    }
}

impl Deref for CheckoutApi {
    type Target = ResourceApi;

    fn deref(&self) -> &ResourceApi {
        &self.inner
    }
}
