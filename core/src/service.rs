//! The order service as an async trait.
//!
//! `OrderClient` implements it over HTTP; code that only needs the four
//! operations can depend on the trait and take a fake in tests.

use async_trait::async_trait;

use crate::client::OrderClient;
use crate::dispatch::CallOptions;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{
    CancelOrderRequest, CancelOrderResponse, CreateOrderRequest, CreateOrderResponse, GetOrderDetailRequest,
    GetOrderDetailResponse, UpdateOrderRequest, UpdateOrderResponse,
};

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn cancel_order(
        &self,
        request: &CancelOrderRequest,
        options: &CallOptions,
    ) -> Result<CancelOrderResponse, ApiError>;

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
        options: &CallOptions,
    ) -> Result<CreateOrderResponse, ApiError>;

    async fn order_detail(
        &self,
        request: &GetOrderDetailRequest,
        options: &CallOptions,
    ) -> Result<GetOrderDetailResponse, ApiError>;

    async fn update(&self, request: &UpdateOrderRequest, options: &CallOptions) -> Result<UpdateOrderResponse, ApiError>;
}

#[async_trait]
impl<T: Transport> OrderService for OrderClient<T> {
    async fn cancel_order(
        &self,
        request: &CancelOrderRequest,
        options: &CallOptions,
    ) -> Result<CancelOrderResponse, ApiError> {
        self.call(request, options).await
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
        options: &CallOptions,
    ) -> Result<CreateOrderResponse, ApiError> {
        self.call(request, options).await
    }

    async fn order_detail(
        &self,
        request: &GetOrderDetailRequest,
        options: &CallOptions,
    ) -> Result<GetOrderDetailResponse, ApiError> {
        self.call(request, options).await
    }

    async fn update(&self, request: &UpdateOrderRequest, options: &CallOptions) -> Result<UpdateOrderResponse, ApiError> {
        self.call(request, options).await
    }
}
