//! Execution of built requests.
//!
//! The dispatcher only produces `HttpRequest` values; a `Transport` performs
//! the single network round-trip. `ReqwestTransport` is the default. Tests
//! and embedders can plug in their own.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Sends one request and returns the response, whatever its status.
///
/// Implementations must not retry, must not treat non-2xx statuses as
/// errors, and should honour `timeout` as a deadline for the whole exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest, timeout: Option<Duration>) -> Result<HttpResponse, ApiError>;
}

/// `reqwest`-backed transport. Cloning shares the connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a preconfigured `reqwest::Client` (proxy, TLS roots, pool limits).
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest, timeout: Option<Duration>) -> Result<HttpResponse, ApiError> {
        let mut builder = self.inner.request(reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // No lossy decoding: a non-UTF-8 body is not JSON.
        let bytes = response.bytes().await?;
        let body = String::from_utf8(bytes.to_vec())
            .map_err(|e| ApiError::MalformedBody(format!("response body is not UTF-8: {e}")))?;

        Ok(HttpResponse { status, headers, body })
    }
}
