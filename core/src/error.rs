//! Error types for the order service client.
//!
//! # Design
//! The dispatcher never looks at status codes: a 404 or 500 comes back as an
//! ordinary `HttpResponse`. Only the typed stubs turn a non-2xx response into
//! `ApiError::Status`, keeping the raw body so the service envelope inside it
//! can still be read with [`ApiError::envelope`]. Service-level failures
//! (`code != 0` in a 2xx envelope) are not errors unless the caller opts in
//! through `Envelope::ensure_ok`.

use thiserror::Error;

use crate::types::Status;

/// Errors returned by the dispatcher, the transports and the typed stubs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL or the request path could not be resolved.
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported HTTP method `{0}`")]
    UnsupportedMethod(String),

    /// A header name or value is not valid in an HTTP request.
    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A query-bound payload field held an array or object.
    #[error("query parameter `{0}` must be a string, number or boolean")]
    UnsupportedQueryValue(String),

    /// Connection, DNS, timeout or I/O failure while talking to the server.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call was cancelled through its `CancellationToken`.
    #[error("request cancelled")]
    Cancelled,

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    MalformedBody(String),

    /// The response body is JSON but not of the declared response shape.
    #[error("response does not match the expected shape: {0}")]
    ShapeMismatch(String),

    /// The service envelope reported a failure code.
    #[error("service error {code}: {message}")]
    Service { code: i64, message: String },
}

impl ApiError {
    /// HTTP status carried by a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The `{code, message}` envelope inside a non-2xx body, if it has one.
    pub fn envelope(&self) -> Option<Status> {
        match self {
            ApiError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport(format!("request timed out: {err}"))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
