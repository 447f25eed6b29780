//! Mock backend for isolating controllers and services in tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::api::{FetchResult, ResourceReader, ResourceWriter};
use crate::domain::types::RecordId;

mock! {
    pub Backend {}

    #[async_trait]
    impl ResourceReader for Backend {
        async fn fetch_json(&self, path: &str) -> FetchResult<Option<Value>>;
    }

    #[async_trait]
    impl ResourceWriter for Backend {
        async fn create(&self, resource: &str, body: &Value) -> FetchResult<Option<Value>>;
        async fn update(
            &self,
            resource: &str,
            id: RecordId,
            body: &Value,
        ) -> FetchResult<Option<Value>>;
        async fn delete(&self, resource: &str, id: RecordId) -> FetchResult<Option<Value>>;
        async fn post_action(
            &self,
            resource: &str,
            id: RecordId,
            action: &str,
            body: &Value,
        ) -> FetchResult<Option<Value>>;
    }
}
