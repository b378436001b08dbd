// ==========================================
// HTTP 路由集成测试
// ==========================================
// 通过 tower::ServiceExt::oneshot 在进程内驱动 axum 路由
// ==========================================

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pentwheel_api::app::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    pentwheel_api::logging::init_test();
    build_router(AppState::in_memory().unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// 金额字段为 JSON 数字, 保留两位小数的原始写法
fn decimal_text(value: &Value) -> String {
    assert!(value.is_number(), "expected JSON number, got {}", value);
    value.to_string()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "healthy", "message": "Pentwheel API is running"})
    );
}

#[tokio::test]
async fn test_create_then_get_repair() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/repairs/",
        Some(json!({
            "repair_id": "SRV-100",
            "issue_description": "Cracked housing",
            "status": "in-progress",
            "labor_cost": 10,
            "parts_cost": 5.5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["priority"], "medium");
    assert_eq!(decimal_text(&created["labor_cost"]), "10.00");
    assert_eq!(decimal_text(&created["total_cost"]), "15.50");

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/repairs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, listed) = send(&app, Method::GET, "/repairs/?status=in-progress&limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_repair_is_404_with_error_body() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::GET,
        "/repairs/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"code": "NOT_FOUND", "detail": "Repair not found"}));
}

#[tokio::test]
async fn test_update_and_delete_company() {
    let app = app();

    let (_, created) = send(
        &app,
        Method::POST,
        "/companies/",
        Some(json!({"name": "Acme Parts", "phone": "555-0100"})),
    )
    .await;
    let uri = format!("/companies/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"phone": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["phone"], Value::Null);
    assert_eq!(updated["name"], "Acme Parts");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Company deleted successfully"}));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_and_conflict_status_codes() {
    let app = app();

    let component = json!({"name": "Panel", "sku": "PN-1", "current_stock": 1});
    let (status, created) = send(&app, Method::POST, "/components/", Some(component.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/components/", Some(component)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, body) = send(
        &app,
        Method::POST,
        "/components/",
        Some(json!({"name": "", "sku": "PN-2"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        Method::POST,
        "/stock-movements/",
        Some(json!({
            "component_id": created["id"],
            "movement_type": "out",
            "quantity": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "BUSINESS_RULE_VIOLATION");

    let (status, sku) = send(&app, Method::GET, "/components/sku/PN-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sku["current_stock"], 1);
}

#[tokio::test]
async fn test_weekly_summary_not_found_then_ok() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/analytics/budget/weekly-summary?week_start=2024-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No budget entries found for this week");

    for (category, budgeted, actual) in [("parts", "1000.00", "1200.00"), ("labor", "500.00", "400.00")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/budget-entries/",
            Some(json!({
                "week_start": "2024-01-01",
                "week_end": "2024-01-07",
                "category": category,
                "budgeted_amount": budgeted,
                "actual_amount": actual
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/analytics/budget/weekly-summary?week_start=2024-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_text(&body["total_budgeted"]), "1500.00");
    assert_eq!(decimal_text(&body["total_actual"]), "1600.00");
    assert_eq!(decimal_text(&body["variance"]), "100.00");
    assert_eq!(decimal_text(&body["variance_percentage"]), "6.6667");
    assert_eq!(body["categories"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_analytics_endpoints_shape() {
    let app = app();

    send(
        &app,
        Method::POST,
        "/shipments/",
        Some(json!({"shipment_id": "SHP-1", "type": "incoming", "total_units": 12})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/components/",
        Some(json!({"name": "Bezel", "sku": "BZ-1", "current_stock": 5, "reorder_level": 5})),
    )
    .await;

    let (status, shipments) = send(&app, Method::GET, "/analytics/shipments/status-summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        shipments,
        json!([{"type": "incoming", "status": "pending", "count": 1, "total_units": 12}])
    );

    let (status, low) = send(&app, Method::GET, "/analytics/components/low-stock", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(low[0]["sku"], "BZ-1");
    assert_eq!(low[0]["difference"], 0);

    let (status, repairs) = send(&app, Method::GET, "/analytics/repairs/status-summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repairs, json!([]));

    let (status, dashboard) = send(&app, Method::GET, "/analytics/dashboard?as_of=2024-01-03", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["week_start"], "2023-12-31");
    assert_eq!(decimal_text(&dashboard["budget_remaining"]), "0.00");
}
