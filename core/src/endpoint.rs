//! Endpoint table and the typed operation binding.
//!
//! Each endpoint is data: a name, a verb, and a path. An `Operation` ties a
//! request type to its endpoint and response type, so every typed stub goes
//! through the same dispatcher code path.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dispatch::RequestSpec;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::types::{
    CancelOrderRequest, CancelOrderResponse, CreateOrderRequest, CreateOrderResponse, Envelope,
    GetOrderDetailRequest, GetOrderDetailResponse, UpdateOrderRequest, UpdateOrderResponse,
};

/// A fixed verb and path on the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
}

impl Endpoint {
    /// A `RequestSpec` for this endpoint carrying `payload`.
    pub fn request_spec<T: Serialize + ?Sized>(&self, payload: &T) -> Result<RequestSpec, ApiError> {
        RequestSpec::new(self.method, self.path).payload(payload)
    }
}

pub const CANCEL_ORDER: Endpoint = Endpoint {
    name: "cancel_order",
    method: HttpMethod::Post,
    path: "/api/v1/order-service/order/cancel",
};

pub const CREATE_ORDER: Endpoint = Endpoint {
    name: "create_order",
    method: HttpMethod::Post,
    path: "/api/v1/order-service/order",
};

pub const ORDER_DETAIL: Endpoint = Endpoint {
    name: "order_detail",
    method: HttpMethod::Get,
    path: "/api/v1/order-service/order/detail",
};

pub const UPDATE: Endpoint = Endpoint {
    name: "update",
    method: HttpMethod::Put,
    path: "/api/v1/order-service/order",
};

/// Every endpoint of the order service.
pub const ENDPOINTS: [Endpoint; 4] = [CANCEL_ORDER, CREATE_ORDER, ORDER_DETAIL, UPDATE];

/// Binds a request type to its endpoint and response type.
pub trait Operation: Serialize + Send + Sync {
    type Response: DeserializeOwned + Envelope + Send;

    const ENDPOINT: Endpoint;

    /// Check the HTTP status, then decode the body as `Self::Response`.
    fn parse(response: HttpResponse) -> Result<Self::Response, ApiError> {
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        response.json()
    }
}

impl Operation for CancelOrderRequest {
    type Response = CancelOrderResponse;
    const ENDPOINT: Endpoint = CANCEL_ORDER;
}

impl Operation for CreateOrderRequest {
    type Response = CreateOrderResponse;
    const ENDPOINT: Endpoint = CREATE_ORDER;
}

impl Operation for GetOrderDetailRequest {
    type Response = GetOrderDetailResponse;
    const ENDPOINT: Endpoint = ORDER_DETAIL;
}

impl Operation for UpdateOrderRequest {
    type Response = UpdateOrderResponse;
    const ENDPOINT: Endpoint = UPDATE;
}
