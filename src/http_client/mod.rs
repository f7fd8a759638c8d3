//! HTTP transport for the upload, results, and analysis endpoints.
//!
//! Pipeline services talk to the network through the [`Transport`] trait so
//! the orchestration can run against an in-memory transport in tests.

mod error;

pub use error::TransportError;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// JSON-over-HTTP operations used by the pipeline.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body and decode the JSON response.
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError>;

    /// GET a URL and decode the JSON response.
    async fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}

/// `reqwest`-backed transport rooted at a base URL.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a new transport.
    ///
    /// With `timeout` unset, requests wait as long as the server takes.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder()
            .user_agent(concat!("docsense/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL relative paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path or absolute URL against the base URL.
    pub fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(url)
            .map_err(|e| TransportError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn decode(resp: reqwest::Response) -> Result<Value, TransportError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.resolve(url)?;
        debug!("POST {}", url);
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        Self::decode(resp).await
    }

    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let url = self.resolve(url)?;
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        Self::decode(resp).await
    }
}
