//! Request and response shapes of the order service.
//!
//! # Design
//! Field names match the service's JSON contract exactly. Response fields
//! are required: a body missing `code`, `message` or an endpoint field fails
//! to decode with `ApiError::ShapeMismatch` instead of silently producing a
//! default. The DTOs are defined independently from the mock-server crate;
//! integration tests catch schema drift.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub item_id: String,
    pub quantity: i64,
}

impl OrderItem {
    pub fn new(item_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CancelOrderRequest {
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CancelOrderResponse {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub order_info: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrderResponse {
    pub code: i64,
    pub message: String,
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetOrderDetailRequest {
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetOrderDetailResponse {
    pub code: i64,
    pub message: String,
    /// Some backends encode an empty list as `null`; it decodes as empty.
    #[serde(deserialize_with = "serde_utils::null_as_empty")]
    pub order_info: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateOrderRequest {
    pub order_info: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateOrderResponse {
    pub code: i64,
    pub message: String,
}

/// The bare `{code, message}` envelope shared by every response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    pub code: i64,
    pub message: String,
}

/// Service-level result carried in every response body.
///
/// A 2xx response can still report a failure through `code`; this is
/// separate from the HTTP status, which the typed stubs check first.
pub trait Envelope {
    fn code(&self) -> i64;

    fn message(&self) -> &str;

    /// `code == 0` means success.
    fn is_ok(&self) -> bool {
        self.code() == 0
    }

    /// Turn a failure code into `ApiError::Service`.
    fn ensure_ok(self) -> Result<Self, ApiError>
    where
        Self: Sized,
    {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(ApiError::Service {
                code: self.code(),
                message: self.message().to_string(),
            })
        }
    }
}

macro_rules! impl_envelope {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Envelope for $ty {
                fn code(&self) -> i64 {
                    self.code
                }

                fn message(&self) -> &str {
                    &self.message
                }
            }
        )+
    };
}

impl_envelope!(
    Status,
    CancelOrderResponse,
    CreateOrderResponse,
    GetOrderDetailResponse,
    UpdateOrderResponse,
);

mod serde_utils {
    use serde::{Deserialize, Deserializer};

    pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }
}
