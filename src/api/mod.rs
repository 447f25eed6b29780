//! Backend access.
//!
//! List controllers only see the [`ResourceReader`] and [`ResourceWriter`]
//! traits; [`HttpBackend`] implements them over the REST API.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::types::RecordId;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use errors::{BackendSetupError, FetchError, FetchResult};
pub use http::{Download, HttpBackend};

#[async_trait]
pub trait ResourceReader: Send + Sync {
    /// GETs `path` (endpoint plus query string).
    ///
    /// Returns `None` when the backend answers with no body.
    async fn fetch_json(&self, path: &str) -> FetchResult<Option<Value>>;
}

#[async_trait]
pub trait ResourceWriter: Send + Sync {
    async fn create(&self, resource: &str, body: &Value) -> FetchResult<Option<Value>>;
    async fn update(&self, resource: &str, id: RecordId, body: &Value)
    -> FetchResult<Option<Value>>;
    async fn delete(&self, resource: &str, id: RecordId) -> FetchResult<Option<Value>>;
    /// POSTs `body` to a sub-action of one record, e.g. `users/7/assign-roles`.
    async fn post_action(
        &self,
        resource: &str,
        id: RecordId,
        action: &str,
        body: &Value,
    ) -> FetchResult<Option<Value>>;
}

#[async_trait]
impl<T: ResourceReader + ?Sized> ResourceReader for Arc<T> {
    async fn fetch_json(&self, path: &str) -> FetchResult<Option<Value>> {
        (**self).fetch_json(path).await
    }
}

#[async_trait]
impl<T: ResourceWriter + ?Sized> ResourceWriter for Arc<T> {
    async fn create(&self, resource: &str, body: &Value) -> FetchResult<Option<Value>> {
        (**self).create(resource, body).await
    }

    async fn update(
        &self,
        resource: &str,
        id: RecordId,
        body: &Value,
    ) -> FetchResult<Option<Value>> {
        (**self).update(resource, id, body).await
    }

    async fn delete(&self, resource: &str, id: RecordId) -> FetchResult<Option<Value>> {
        (**self).delete(resource, id).await
    }

    async fn post_action(
        &self,
        resource: &str,
        id: RecordId,
        action: &str,
        body: &Value,
    ) -> FetchResult<Option<Value>> {
        (**self).post_action(resource, id, action, body).await
    }
}
