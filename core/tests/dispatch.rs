//! Wire-level tests of the dispatcher using mockito.

use mockito::Matcher;
use order_client::{
    ApiError, CallOptions, CancelOrderRequest, ClientConfig, CreateOrderRequest, CreateOrderResponse,
    GetOrderDetailRequest, OrderClient, OrderItem, OrderService, RequestSpec, UpdateOrderRequest,
};
use serde_json::json;

fn client(server: &mockito::Server) -> OrderClient {
    OrderClient::new(ClientConfig::new(&server.url()).unwrap())
}

#[tokio::test]
async fn create_order_sends_exact_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/order-service/order")
        .match_header("content-type", "application/json")
        .match_body(Matcher::JsonString(
            r#"{"order_info":[{"item_id":"sku1","quantity":2}]}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":0,"message":"ok","order_id":"ORD-1"}"#)
        .create_async()
        .await;

    let resp = client(&server)
        .create_order(
            &CreateOrderRequest {
                order_info: vec![OrderItem::new("sku1", 2)],
            },
            &CallOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        resp,
        CreateOrderResponse {
            code: 0,
            message: "ok".to_string(),
            order_id: "ORD-1".to_string(),
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn order_detail_sends_payload_as_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/order-service/order/detail")
        .match_query(Matcher::UrlEncoded("order_id".to_string(), "ORD-1".to_string()))
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body(r#"{"code":0,"message":"ok","order_info":[{"item_id":"sku1","quantity":2}]}"#)
        .create_async()
        .await;

    let resp = client(&server)
        .order_detail(
            &GetOrderDetailRequest {
                order_id: "ORD-1".to_string(),
            },
            &CallOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(resp.order_info, vec![OrderItem::new("sku1", 2)]);
    mock.assert_async().await;
}

#[tokio::test]
async fn repeated_calls_are_not_deduplicated() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/order-service/order/detail")
        .match_query(Matcher::UrlEncoded("order_id".to_string(), "ORD-1".to_string()))
        .with_status(200)
        .with_body(r#"{"code":0,"message":"ok","order_info":[]}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client(&server);
    let request = GetOrderDetailRequest {
        order_id: "ORD-1".to_string(),
    };
    client.order_detail(&request, &CallOptions::default()).await.unwrap();
    client.order_detail(&request, &CallOptions::default()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn caller_headers_arrive_unmodified_and_win_over_defaults() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/v1/order-service/order")
        .match_header("authorization", "Bearer caller")
        .match_header("content-type", "application/json; charset=utf-8")
        .match_header("x-client", "order-client")
        .match_header("x-request-id", "req-42")
        .with_status(200)
        .with_body(r#"{"code":0,"message":"ok"}"#)
        .create_async()
        .await;

    let config = ClientConfig::new(&server.url())
        .unwrap()
        .with_default_header("Authorization", "Bearer default")
        .with_default_header("x-client", "order-client");
    let client = OrderClient::new(config);
    let options = CallOptions::new()
        .header("authorization", "Bearer caller")
        .header("Content-Type", "application/json; charset=utf-8")
        .header("x-request-id", "req-42");

    client
        .update(
            &UpdateOrderRequest {
                order_info: vec![OrderItem::new("sku1", 3)],
            },
            &options,
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn cancel_order_404_is_not_swallowed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/order-service/order/cancel")
        .match_body(Matcher::Json(json!({"order_id": "ORD-1"})))
        .with_status(404)
        .with_body("404 page not found")
        .create_async()
        .await;

    let err = client(&server)
        .cancel_order(
            &CancelOrderRequest {
                order_id: "ORD-1".to_string(),
            },
            &CallOptions::default(),
        )
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, ref body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "404 page not found");
        }
        other => panic!("expected ApiError::Status, got {other:?}"),
    }
    assert!(err.envelope().is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn shape_mismatch_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/order-service/order")
        .with_status(200)
        .with_body(r#"{"code":0,"message":"ok"}"#)
        .create_async()
        .await;

    let err = client(&server)
        .create_order(
            &CreateOrderRequest {
                order_info: vec![OrderItem::new("sku1", 1)],
            },
            &CallOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::ShapeMismatch(_)), "{err:?}");
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_via_raw_dispatch_uses_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/v1/order-service/order")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("order_id".to_string(), "ORD-3".to_string()),
            Matcher::UrlEncoded("force".to_string(), "true".to_string()),
        ]))
        .match_body(Matcher::Exact(String::new()))
        .with_status(204)
        .create_async()
        .await;

    let spec = RequestSpec::parse("Delete", "/api/v1/order-service/order")
        .unwrap()
        .payload(&json!({"order_id": "ORD-3", "force": true}))
        .unwrap();
    let response = client(&server)
        .dispatch(&spec, &CallOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status, 204);
    assert!(response.body.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn non_utf8_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/order-service/order")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(b"{\"code\":0,\"message\":\"\xff\xfe\",\"order_id\":\"ORD-1\"}")
        .create_async()
        .await;

    let err = client(&server)
        .create_order(
            &CreateOrderRequest {
                order_info: vec![OrderItem::new("sku1", 1)],
            },
            &CallOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::MalformedBody(_)), "{err:?}");
    mock.assert_async().await;
}

#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/order-service/order/detail")
        .match_query(Matcher::UrlEncoded("order_id".to_string(), "ORD-1".to_string()))
        .with_status(200)
        .with_body(r#"{"code":0,"message":"ok","order_info":[{"item_id":"sku1","quantity":2}]}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client(&server);
    let request = GetOrderDetailRequest {
        order_id: "ORD-1".to_string(),
    };
    let options = CallOptions::default();
    let (first, second) = tokio::join!(
        client.order_detail(&request, &options),
        client.order_detail(&request, &options),
    );

    assert_eq!(first.unwrap(), second.unwrap());
    mock.assert_async().await;
}
