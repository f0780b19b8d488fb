//! Typed asynchronous client for the order service.
//!
//! # Overview
//! Four operations (`cancel_order`, `create_order`, `order_detail`,
//! `update`) are thin typed facades over one generic dispatcher. The
//! dispatcher resolves the URL against the configured base, places the
//! payload in the query string (GET/DELETE) or a JSON body (POST/PUT/PATCH),
//! merges headers, and sends the request through a `Transport`.
//!
//! # Design
//! - `ClientConfig` is immutable once built; the client holds no other state.
//! - Request building is pure, so `OrderClient::build` / `OrderClient::parse`
//!   also work with a caller-executed HTTP round-trip.
//! - Two error channels stay distinct: a non-2xx HTTP status is
//!   `ApiError::Status` from the typed stubs (the raw dispatcher returns it
//!   as a normal response), while the service's own `code` lives in the
//!   decoded envelope (see `Envelope`).
//!
//! ```no_run
//! use order_client::{CallOptions, ClientConfig, CreateOrderRequest, OrderClient, OrderItem, OrderService};
//!
//! # async fn run() -> Result<(), order_client::ApiError> {
//! let client = OrderClient::new(ClientConfig::new("https://api.example.com")?);
//! let created = client
//!     .create_order(
//!         &CreateOrderRequest { order_info: vec![OrderItem::new("sku1", 2)] },
//!         &CallOptions::default(),
//!     )
//!     .await?;
//! println!("created {}", created.order_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::OrderClient;
pub use config::ClientConfig;
pub use dispatch::{CallOptions, Dispatcher, RequestSpec};
pub use endpoint::{Endpoint, Operation, ENDPOINTS};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, PayloadPlacement};
pub use service::OrderService;
pub use tokio_util::sync::CancellationToken;
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    CancelOrderRequest, CancelOrderResponse, CreateOrderRequest, CreateOrderResponse, Envelope,
    GetOrderDetailRequest, GetOrderDetailResponse, OrderItem, Status, UpdateOrderRequest, UpdateOrderResponse,
};
