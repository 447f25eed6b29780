use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::api::errors::{BackendSetupError, classify};
use crate::api::{FetchError, FetchResult, ResourceReader, ResourceWriter};
use crate::domain::types::RecordId;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for the contract-management backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpBackend {
    inner: Arc<HttpBackendInner>,
}

struct HttpBackendInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

/// Raw body of a file download.
#[derive(Debug, Clone)]
pub struct Download {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl HttpBackend {
    pub fn builder(base_url: impl Into<String>) -> HttpBackendBuilder {
        HttpBackendBuilder {
            base_url: base_url.into(),
            timeout: Some(DEFAULT_TIMEOUT),
            http_client: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self
            .inner
            .http_client
            .request(method, self.endpoint(path))
            .header(ACCEPT, "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> FetchResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or_default();
        let body = response.text().await.unwrap_or_default();
        let error = classify(status.as_u16(), reason, &body);
        log::debug!("Backend answered {status}: {error}");
        Err(error)
    }

    async fn send_json(&self, request: RequestBuilder) -> FetchResult<Option<Value>> {
        let response = self.send(request).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| FetchError::Schema(format!("invalid JSON body: {e}")))
    }

    /// GETs a binary resource such as a CSV export.
    pub async fn download(&self, path: &str) -> FetchResult<Download> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(Download {
            content_type,
            bytes,
        })
    }
}

#[async_trait]
impl ResourceReader for HttpBackend {
    async fn fetch_json(&self, path: &str) -> FetchResult<Option<Value>> {
        self.send_json(self.request(Method::GET, path)).await
    }
}

#[async_trait]
impl ResourceWriter for HttpBackend {
    async fn create(&self, resource: &str, body: &Value) -> FetchResult<Option<Value>> {
        self.send_json(self.request(Method::POST, resource).json(body))
            .await
    }

    async fn update(
        &self,
        resource: &str,
        id: RecordId,
        body: &Value,
    ) -> FetchResult<Option<Value>> {
        let path = format!("{}/{}", resource.trim_end_matches('/'), id);
        self.send_json(self.request(Method::PUT, &path).json(body))
            .await
    }

    async fn delete(&self, resource: &str, id: RecordId) -> FetchResult<Option<Value>> {
        let path = format!("{}/{}", resource.trim_end_matches('/'), id);
        self.send_json(self.request(Method::DELETE, &path)).await
    }

    async fn post_action(
        &self,
        resource: &str,
        id: RecordId,
        action: &str,
        body: &Value,
    ) -> FetchResult<Option<Value>> {
        let path = format!("{}/{}/{}", resource.trim_end_matches('/'), id, action);
        self.send_json(self.request(Method::POST, &path).json(body))
            .await
    }
}

/// Builder for [`HttpBackend`].
pub struct HttpBackendBuilder {
    base_url: String,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl HttpBackendBuilder {
    /// Per-request timeout; `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Uses a preconfigured `reqwest` client, e.g. one carrying session cookies.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<HttpBackend, BackendSetupError> {
        let parsed = Url::parse(&self.base_url)?;
        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder().build()?,
        };

        Ok(HttpBackend {
            inner: Arc::new(HttpBackendInner {
                base_url: parsed.as_str().trim_end_matches('/').to_string(),
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
