//! End-to-end tests driving the real router over a temp-file database.

use axum::Router;
use axum::body::Body;
use directory_server::core::{Config, ServerState, build_router};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_router() -> (Router, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await.expect("state");
    (build_router().with_state(state), tmp)
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_employee(router: &Router, name: &str, email: &str, position: &str) -> Value {
    let (status, body) = send(
        router,
        "POST",
        "/api/employees",
        Some(json!({ "name": name, "email": email, "position": position })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["data"].clone()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (router, _tmp) = test_router().await;
    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn create_with_fresh_email_returns_id() {
    let (router, _tmp) = test_router().await;
    let created = create_employee(&router, "John Doe", "john@example.com", "Engineer").await;

    assert!(created["id"].as_i64().unwrap() > 0);
    assert_eq!(created["name"], "John Doe");
    assert_eq!(created["email"], "john@example.com");
    assert_eq!(created["position"], "Engineer");
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());
}

#[tokio::test]
async fn create_normalizes_email_case() {
    let (router, _tmp) = test_router().await;
    let created = create_employee(&router, "John Doe", "  John@Example.COM ", "Engineer").await;
    assert_eq!(created["email"], "john@example.com");
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let (router, _tmp) = test_router().await;
    create_employee(&router, "John Doe", "john@example.com", "Engineer").await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/employees",
        Some(json!({ "name": "Jane Doe", "email": "JOHN@EXAMPLE.COM", "position": "Manager" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn invalid_email_fails_validation() {
    let (router, _tmp) = test_router().await;
    let (status, body) = send(
        &router,
        "POST",
        "/api/employees",
        Some(json!({ "name": "John Doe", "email": "invalid-email", "position": "Engineer" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn short_name_fails_validation() {
    let (router, _tmp) = test_router().await;
    let (status, body) = send(
        &router,
        "POST",
        "/api/employees",
        Some(json!({ "name": "J", "email": "j@example.com", "position": "Engineer" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "name");
}

#[tokio::test]
async fn fetching_missing_id_returns_not_found() {
    let (router, _tmp) = test_router().await;
    let (status, body) = send(&router, "GET", "/api/employees/99999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Employee not found");
}

#[tokio::test]
async fn position_only_update_leaves_other_fields_untouched() {
    let (router, _tmp) = test_router().await;
    let created = create_employee(&router, "John Doe", "john@example.com", "Engineer").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &router,
        "PUT",
        &format!("/api/employees/{id}"),
        Some(json!({ "position": "Staff Engineer" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = &body["data"];
    assert_eq!(updated["name"], "John Doe");
    assert_eq!(updated["email"], "john@example.com");
    assert_eq!(updated["position"], "Staff Engineer");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn update_missing_id_returns_not_found() {
    let (router, _tmp) = test_router().await;
    let (status, _) = send(
        &router,
        "PUT",
        "/api/employees/99999",
        Some(json!({ "position": "Manager" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_email_collision_with_other_employee_is_rejected() {
    let (router, _tmp) = test_router().await;
    create_employee(&router, "John Doe", "john@example.com", "Engineer").await;
    let jane = create_employee(&router, "Jane Doe", "jane@example.com", "Manager").await;
    let jane_id = jane["id"].as_i64().unwrap();

    let (status, body) = send(
        &router,
        "PUT",
        &format!("/api/employees/{jane_id}"),
        Some(json!({ "email": "john@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn update_keeping_own_email_is_allowed() {
    let (router, _tmp) = test_router().await;
    let created = create_employee(&router, "John Doe", "john@example.com", "Engineer").await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &router,
        "PUT",
        &format!("/api/employees/{id}"),
        Some(json!({ "email": "john@example.com", "name": "Johnny Doe" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_then_fetch_returns_not_found() {
    let (router, _tmp) = test_router().await;
    let created = create_employee(&router, "John Doe", "john@example.com", "Engineer").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&router, "DELETE", &format!("/api/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");

    let (status, _) = send(&router, "GET", &format!("/api/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting twice: second attempt is a 404
    let (status, _) = send(&router, "DELETE", &format!("/api/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_matches_name_email_and_position() {
    let (router, _tmp) = test_router().await;
    create_employee(&router, "John Doe", "john@example.com", "Engineer").await;
    create_employee(&router, "Alice Smith", "alice@example.com", "Manager").await;
    create_employee(&router, "Bob Brown", "bob@johnson-corp.com", "Analyst").await;

    let (status, body) = send(&router, "GET", "/api/employees?search=john", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"John Doe"));
    assert!(names.contains(&"Bob Brown"));
    assert!(!names.contains(&"Alice Smith"));
}

#[tokio::test]
async fn search_treats_like_wildcards_as_literals() {
    let (router, _tmp) = test_router().await;
    create_employee(&router, "Remote Rita", "rita@example.com", "100% Remote").await;
    create_employee(&router, "Office Omar", "omar@example.com", "Engineer").await;
    create_employee(&router, "Snake Case", "snake_case@example.com", "Analyst").await;

    // '%' matches only the literal character, not every row
    let (status, body) = send(&router, "GET", "/api/employees?search=100%25", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Remote Rita");

    // '_' is not a single-character wildcard: "e_c" would otherwise also
    // match the "e.c" in the other employees' "example.com" addresses
    let (status, body) = send(&router, "GET", "/api/employees?search=e_c", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Snake Case");
}

#[tokio::test]
async fn list_is_newest_first_and_carries_count() {
    let (router, _tmp) = test_router().await;
    create_employee(&router, "First Hire", "first@example.com", "Engineer").await;
    create_employee(&router, "Second Hire", "second@example.com", "Manager").await;

    let (status, body) = send(&router, "GET", "/api/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["name"], "Second Hire");
    assert_eq!(body["data"][1]["name"], "First Hire");
}
