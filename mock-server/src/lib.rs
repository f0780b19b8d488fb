use std::{collections::HashMap, fmt, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const ORDER_PATH: &str = "/api/v1/order-service/order";
pub const CANCEL_PATH: &str = "/api/v1/order-service/order/cancel";
pub const DETAIL_PATH: &str = "/api/v1/order-service/order/detail";

/// Envelope codes returned by the service.
pub mod code {
    pub const OK: i64 = 0;
    pub const BAD_PAYLOAD: i64 = -1;
    pub const NOT_FOUND: i64 = 1;
    pub const ALREADY_CANCELLED: i64 = 2;
    pub const EMPTY_ORDER: i64 = 3;
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub item_id: String,
    pub quantity: i64,
}

#[derive(Deserialize)]
pub struct CancelOrderRequest {
    pub order_id: String,
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub order_info: Vec<OrderItem>,
}

#[derive(Deserialize)]
pub struct GetOrderDetailRequest {
    pub order_id: String,
}

#[derive(Deserialize)]
pub struct UpdateOrderRequest {
    pub order_info: Vec<OrderItem>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusReply {
    pub code: i64,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateOrderReply {
    pub code: i64,
    pub message: String,
    pub order_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderDetailReply {
    pub code: i64,
    pub message: String,
    pub order_info: Vec<OrderItem>,
}

#[derive(Clone, Debug)]
struct Order {
    items: Vec<OrderItem>,
    cancelled: bool,
}

#[derive(Debug, Default)]
pub struct Store {
    orders: HashMap<String, Order>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(ORDER_PATH, post(create_order).put(update_order))
        .route(CANCEL_PATH, post(cancel_order))
        .route(DETAIL_PATH, get(order_detail))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn ok() -> StatusReply {
    StatusReply {
        code: code::OK,
        message: "ok".to_string(),
    }
}

fn not_found() -> Response {
    let reply = StatusReply {
        code: code::NOT_FOUND,
        message: "order not found".to_string(),
    };
    (StatusCode::NOT_FOUND, Json(reply)).into_response()
}

fn bad_payload(err: impl fmt::Display) -> Response {
    let reply = StatusReply {
        code: code::BAD_PAYLOAD,
        message: format!("unable to parse request payload, error {err}"),
    };
    (StatusCode::BAD_REQUEST, Json(reply)).into_response()
}

async fn create_order(State(db): State<Db>, payload: Result<Json<CreateOrderRequest>, JsonRejection>) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return bad_payload(rejection.body_text()),
    };
    if input.order_info.is_empty() {
        let reply = CreateOrderReply {
            code: code::EMPTY_ORDER,
            message: "order_info must not be empty".to_string(),
            order_id: String::new(),
        };
        return Json(reply).into_response();
    }

    let mut store = db.write().await;
    store.next_id += 1;
    let order_id = format!("ORD-{}", store.next_id);
    store.orders.insert(
        order_id.clone(),
        Order {
            items: input.order_info,
            cancelled: false,
        },
    );
    tracing::info!(%order_id, "order created");

    Json(CreateOrderReply {
        code: code::OK,
        message: "ok".to_string(),
        order_id,
    })
    .into_response()
}

async fn cancel_order(State(db): State<Db>, payload: Result<Json<CancelOrderRequest>, JsonRejection>) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return bad_payload(rejection.body_text()),
    };

    let mut store = db.write().await;
    let Some(order) = store.orders.get_mut(&input.order_id) else {
        return not_found();
    };
    if order.cancelled {
        let reply = StatusReply {
            code: code::ALREADY_CANCELLED,
            message: "order already cancelled".to_string(),
        };
        return Json(reply).into_response();
    }
    order.cancelled = true;
    tracing::info!(order_id = %input.order_id, "order cancelled");
    Json(ok()).into_response()
}

async fn order_detail(State(db): State<Db>, query: Result<Query<GetOrderDetailRequest>, QueryRejection>) -> Response {
    let input = match query {
        Ok(Query(input)) => input,
        Err(rejection) => return bad_payload(rejection.body_text()),
    };

    let store = db.read().await;
    match store.orders.get(&input.order_id) {
        Some(order) => Json(OrderDetailReply {
            code: code::OK,
            message: "ok".to_string(),
            order_info: order.items.clone(),
        })
        .into_response(),
        None => not_found(),
    }
}

/// Set the quantity of every listed item in every open order holding it.
async fn update_order(State(db): State<Db>, payload: Result<Json<UpdateOrderRequest>, JsonRejection>) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return bad_payload(rejection.body_text()),
    };

    let mut store = db.write().await;
    let mut touched = 0usize;
    for order in store.orders.values_mut().filter(|order| !order.cancelled) {
        let mut changed = false;
        for update in &input.order_info {
            for item in order.items.iter_mut().filter(|item| item.item_id == update.item_id) {
                item.quantity = update.quantity;
                changed = true;
            }
        }
        if changed {
            touched += 1;
        }
    }

    if touched == 0 {
        return not_found();
    }
    tracing::info!(orders = touched, "orders updated");
    Json(ok()).into_response()
}
