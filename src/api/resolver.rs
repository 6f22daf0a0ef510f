//! Resource name → façade resolution

use super::resource::ResourceApi;
use crate::error::Result;
use crate::http::ApiClient;
use crate::uri::UriMap;
use std::sync::Arc;

/// Builds a [`ResourceApi`] for a logical resource name through a [`UriMap`]
#[derive(Debug, Clone)]
pub struct ApiResolver<M: UriMap> {
    uri_map: M,
}

impl<M: UriMap> ApiResolver<M> {
    pub fn new(uri_map: M) -> Self {
        Self { uri_map }
    }

    /// Façade for `resource` on top of `client`
    pub fn resolve(&self, client: Arc<dyn ApiClient>, resource: &str) -> Result<ResourceApi> {
        ResourceApi::new(client, self.uri_map.uri_for(resource)?)
    }

    pub fn uri_map(&self) -> &M {
        &self.uri_map
    }
}
