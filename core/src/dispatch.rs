//! The generic request dispatcher.
//!
//! # Design
//! `Dispatcher` holds only the immutable `ClientConfig`. `build` is pure: it
//! resolves the URL, places the payload according to the verb, and merges
//! headers. `dispatch` adds the single I/O step through a `Transport`,
//! bounded by an optional deadline and cancellation token. No status code is
//! interpreted here; a 404 is returned as `Ok(HttpResponse)`.
//!
//! Payload placement is decided by the verb alone: GET/DELETE put every
//! top-level payload field in the query string, POST/PUT/PATCH send the
//! payload as a JSON body. There is no way to put a payload in both.

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::ApiError;
use crate::http::{find_header, HttpMethod, HttpRequest, HttpResponse, PayloadPlacement};
use crate::transport::Transport;

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";

/// Everything needed to describe one call before URL resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: String,
    pub payload: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: None,
            headers: Vec::new(),
        }
    }

    /// Like `new`, taking the verb as a case-insensitive string.
    pub fn parse(method: &str, path: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self::new(method.parse()?, path))
    }

    /// Attach a payload, serialized to a JSON value up front.
    pub fn payload<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.payload = Some(value);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Per-call settings of a typed stub or a raw dispatch.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Highest-precedence headers for this call.
    pub headers: Vec<(String, String)>,
    /// Overrides `ClientConfig::timeout` for this call.
    pub timeout: Option<Duration>,
    /// Aborts the in-flight call with `ApiError::Cancelled` when triggered.
    pub cancel: Option<CancellationToken>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Turns `RequestSpec`s into `HttpRequest`s and sends them.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: ClientConfig,
}

impl Dispatcher {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the outgoing request for `spec` without sending it.
    pub fn build(&self, spec: &RequestSpec) -> Result<HttpRequest, ApiError> {
        self.assemble(spec, &spec.headers)
    }

    /// Build the outgoing request for a typed operation.
    pub fn prepare<O: Operation>(&self, operation: &O) -> Result<HttpRequest, ApiError> {
        self.build(&O::ENDPOINT.request_spec(operation)?)
    }

    /// Build `spec` and send it through `transport`.
    ///
    /// `options.headers` take precedence over `spec.headers`. The returned
    /// response may carry any status; callers decide what a non-2xx means.
    pub async fn dispatch<T>(
        &self,
        transport: &T,
        spec: &RequestSpec,
        options: &CallOptions,
    ) -> Result<HttpResponse, ApiError>
    where
        T: Transport + ?Sized,
    {
        let request = if options.headers.is_empty() {
            self.build(spec)?
        } else {
            let mut caller = options.headers.clone();
            for (name, value) in &spec.headers {
                if find_header(&options.headers, name).is_none() {
                    caller.push((name.clone(), value.clone()));
                }
            }
            self.assemble(spec, &caller)?
        };

        let method = request.method;
        let url = request.url.clone();
        let timeout = options.timeout.or(self.config.timeout());
        tracing::debug!(%method, %url, ?timeout, "dispatching request");

        let send = transport.send(request, timeout);
        let result = match &options.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(ApiError::Cancelled),
                    result = send => result,
                }
            }
            None => send.await,
        };

        match &result {
            Ok(response) => tracing::debug!(%method, %url, status = response.status, "received response"),
            Err(err) => tracing::warn!(%method, %url, error = %err, "request failed"),
        }
        result
    }

    fn assemble(&self, spec: &RequestSpec, caller_headers: &[(String, String)]) -> Result<HttpRequest, ApiError> {
        let mut url = self.config.resolve(&spec.path)?;

        let body = match (spec.method.payload_placement(), &spec.payload) {
            (_, None) | (_, Some(Value::Null)) => None,
            (PayloadPlacement::Query, Some(payload)) => {
                append_query(&mut url, payload)?;
                None
            }
            (PayloadPlacement::Body, Some(payload)) => {
                Some(serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?)
            }
        };

        let headers = merge_headers(caller_headers, self.config.default_headers(), body.is_some());
        validate_headers(&headers)?;

        Ok(HttpRequest {
            method: spec.method,
            url: url.into(),
            headers,
            body,
        })
    }
}

/// Append each top-level field of `payload` as one query parameter. A `null`
/// field is sent with an empty value.
fn append_query(url: &mut Url, payload: &Value) -> Result<(), ApiError> {
    let Value::Object(fields) = payload else {
        return Err(ApiError::Serialization(
            "query payload must be a JSON object".to_string(),
        ));
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let text = match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => return Err(ApiError::UnsupportedQueryValue(key.clone())),
        };
        pairs.push((key.as_str(), text));
    }

    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(())
}

fn validate_headers(headers: &[(String, String)]) -> Result<(), ApiError> {
    for (name, value) in headers {
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

/// Caller headers are kept verbatim; a default is added only when no caller
/// header has the same (case-insensitive) name.
fn merge_headers(
    caller: &[(String, String)],
    defaults: &[(String, String)],
    has_body: bool,
) -> Vec<(String, String)> {
    let mut merged = caller.to_vec();
    for (name, value) in defaults {
        if find_header(&merged, name).is_none() {
            merged.push((name.clone(), value.clone()));
        }
    }
    if has_body && find_header(&merged, CONTENT_TYPE).is_none() {
        merged.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
    }
    merged
}
