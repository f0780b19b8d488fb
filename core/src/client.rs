//! Typed client for the order service.
//!
//! # Design
//! `OrderClient` pairs a `Dispatcher` (immutable config) with a `Transport`
//! and carries no other state. Every typed stub is `call::<O>()`: the request
//! becomes a `RequestSpec` from its endpoint, goes through the one
//! dispatcher, and the raw response is parsed by `Operation::parse`.
//!
//! Callers who run the HTTP exchange themselves can use `build` and `parse`
//! and skip the transport entirely.

use crate::config::ClientConfig;
use crate::dispatch::{CallOptions, Dispatcher, RequestSpec};
use crate::endpoint::Operation;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};

/// Asynchronous, stateless client for the order service.
#[derive(Debug, Clone)]
pub struct OrderClient<T = ReqwestTransport> {
    dispatcher: Dispatcher,
    transport: T,
}

impl OrderClient<ReqwestTransport> {
    /// Client using a fresh `reqwest` connection pool.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> OrderClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the outgoing request for `operation` without sending it.
    pub fn build<O: Operation>(&self, operation: &O) -> Result<HttpRequest, ApiError> {
        self.dispatcher.prepare(operation)
    }

    /// Parse a response obtained for a request built with `build::<O>`.
    pub fn parse<O: Operation>(&self, response: HttpResponse) -> Result<O::Response, ApiError> {
        O::parse(response)
    }

    /// Send an arbitrary request and return the raw response, whatever its
    /// status.
    pub async fn dispatch(&self, spec: &RequestSpec, options: &CallOptions) -> Result<HttpResponse, ApiError> {
        self.dispatcher.dispatch(&self.transport, spec, options).await
    }

    /// Run a typed operation.
    ///
    /// A non-2xx status is `ApiError::Status`; a 2xx envelope with a non-zero
    /// `code` is returned as `Ok` and left for the caller to inspect.
    pub async fn call<O: Operation>(&self, operation: &O, options: &CallOptions) -> Result<O::Response, ApiError> {
        let spec = O::ENDPOINT.request_spec(operation)?;
        let response = self.dispatch(&spec, options).await?;
        tracing::trace!(endpoint = O::ENDPOINT.name, status = response.status, "decoding response");
        O::parse(response)
    }
}
