//! HTTP transport types shared by the dispatcher and the transports.
//!
//! # Design
//! Requests and responses are plain data. The dispatcher builds an
//! `HttpRequest` without touching the network, a `Transport` executes it, and
//! the typed stubs decode the resulting `HttpResponse`. Keeping the values
//! owned (`String`, `Vec`) lets a caller run the round-trip with any HTTP
//! client and hand the response back for parsing.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Where a request payload travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadPlacement {
    /// Each top-level payload field becomes one query parameter.
    Query,
    /// The payload is serialized as a JSON request body.
    Body,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Verb convention: GET and DELETE read their payload from the query
    /// string, every other verb from the body.
    pub fn payload_placement(&self) -> PayloadPlacement {
        match self {
            HttpMethod::Get | HttpMethod::Delete => PayloadPlacement::Query,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => PayloadPlacement::Body,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    /// Parses a verb case-insensitively (`"get"`, `"Get"` and `"GET"` are equal).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ApiError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// A fully resolved outgoing request.
///
/// `url` is absolute and already carries the query string when the payload is
/// query-bound; `body` is the JSON text when it is body-bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A raw response as returned by a transport, for any status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Decode the body as JSON into `T`.
    ///
    /// Text that is not JSON at all yields `MalformedBody`; valid JSON that
    /// does not fit `T` (missing field, wrong type) yields `ShapeMismatch`.
    /// The status code is not consulted.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| match e.classify() {
            Category::Data => ApiError::ShapeMismatch(e.to_string()),
            Category::Io | Category::Syntax | Category::Eof => ApiError::MalformedBody(e.to_string()),
        })
    }
}

pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
