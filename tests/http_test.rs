use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use b2b_cart::http::AppRouter;
use b2b_cart::lifecycle::CartSystem;
use b2b_cart::model::StockSnapshot;
use b2b_cart::stock::InMemoryCatalog;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let catalog = InMemoryCatalog::with_stock([
        (
            "SKU-1",
            StockSnapshot {
                own_stock: 10,
                delivery_stock: 0,
                delivery_eta_text: None,
                supplier_name: None,
            },
        ),
        (
            "SKU-2",
            StockSnapshot {
                own_stock: 0,
                delivery_stock: 4,
                delivery_eta_text: Some("2 weeks".into()),
                supplier_name: Some("Northwind".into()),
            },
        ),
    ]);
    let system = CartSystem::new(16, Arc::new(catalog));
    AppRouter::build(system.app_state())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        request = request.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn item(product: &str, quantity: u32, price: &str) -> Value {
    json!({
        "productId": product,
        "sku": format!("SKU-{product}"),
        "name": { "primary": product },
        "unitPrice": price,
        "quantity": quantity,
    })
}

#[tokio::test]
async fn test_cart_requires_identity() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");

    let (status, _) = send(
        &app,
        "POST",
        "/api/cart",
        None,
        Some(json!({ "action": "clear" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_cart_shape() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/cart", Some("u1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": [], "total": "0", "count": 0 }));
}

#[tokio::test]
async fn test_cart_actions_round_trip() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "add", "item": item("a", 2, "10.00") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert!(body["items"][0]["id"].is_string());

    let (_, body) = send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "add", "item": item("a", 3, "10.00") })),
    )
    .await;
    assert_eq!(body["items"][0]["quantity"], 5);
    assert_eq!(body["total"], "50.00");

    let (_, body) = send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "update", "productId": "a", "quantity": 0 })),
    )
    .await;
    assert_eq!(body["count"], 0);

    // another user's cart is untouched
    let (_, body) = send(&app, "GET", "/api/cart", Some("u2"), None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_invalid_cart_requests_are_bad_requests() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "add" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "add", "item": item("a", 0, "1.00") })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "remove" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "update", "productId": "missing", "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_cart_bodies_use_error_shape() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "add", "item": { "productId": "a", "sku": "SKU-a",
            "name": { "primary": "a" }, "unitPrice": "1.00", "quantity": -1 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());

    let (status, body) = send(
        &app,
        "PUT",
        "/api/cart",
        Some("u1"),
        Some(json!({ "localCart": "not a list" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "add", "item": item("a", 1, "1.00") })),
    )
    .await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "update", "productId": "a", "quantity": 4_294_967_296_i64 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, body) = send(&app, "GET", "/api/cart", Some("u1"), None).await;
    assert_eq!(body["items"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_put_merges_with_max_rule() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/cart",
        Some("u1"),
        Some(json!({ "action": "add", "item": item("a", 1, "2.00") })),
    )
    .await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/cart",
        Some("u1"),
        Some(json!({ "localCart": [item("a", 3, "2.00"), item("b", 1, "1.50")] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["items"][0]["quantity"], 3);
    assert_eq!(body["total"], "7.50");
}

#[tokio::test]
async fn test_stock_check_reports_decision_and_alternative() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/stock-check",
        None,
        Some(json!({ "sku": "SKU-1", "quantity": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "available");
    assert_eq!(body["availableQuantity"], 10);
    assert_eq!(body["requiresConfirmation"], false);

    let (_, body) = send(
        &app,
        "POST",
        "/api/stock-check",
        None,
        Some(json!({ "sku": "SKU-2", "quantity": 4 })),
    )
    .await;
    assert_eq!(body["status"], "delivery");
    assert_eq!(body["supplierName"], "Northwind");
    assert_eq!(body["requiresConfirmation"], true);

    let (_, body) = send(
        &app,
        "POST",
        "/api/stock-check",
        None,
        Some(json!({ "sku": "SKU-2", "quantity": 9 })),
    )
    .await;
    assert_eq!(body["status"], "insufficient");
    assert_eq!(
        body["alternative"],
        json!({ "kind": "reduceQuantity", "maxQuantity": 4 })
    );

    let (_, body) = send(
        &app,
        "POST",
        "/api/stock-check",
        None,
        Some(json!({ "sku": "SKU-unknown", "quantity": 1 })),
    )
    .await;
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["alternative"]["kind"], "registerAlert");

    let (status, _) = send(
        &app,
        "POST",
        "/api/stock-check",
        None,
        Some(json!({ "sku": "SKU-1", "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stock_alert_created_then_conflict() {
    let app = app();
    let alert = json!({
        "productId": "p1",
        "sku": "SKU-1",
        "name": { "primary": "Bolt" },
        "email": "Buyer@Example.com",
    });

    let (status, body) = send(&app, "POST", "/api/stock-alerts", None, Some(alert.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");

    let (status, body) = send(
        &app,
        "POST",
        "/api/stock-alerts",
        Some("u1"),
        Some(alert.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "buyer@example.com");
    assert!(body["createdAt"].is_string());

    // same address with padding and other letter case
    let mut padded = alert;
    padded["email"] = json!("  BUYER@example.com ");
    let (status, body) = send(&app, "POST", "/api/stock-alerts", Some("u1"), Some(padded)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");

    let (status, _) = send(
        &app,
        "POST",
        "/api/stock-alerts",
        Some("u1"),
        Some(json!({
            "productId": "p1",
            "sku": "SKU-1",
            "name": { "primary": "Bolt" },
            "email": "not-an-email",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
