//! HTTP API Tests
//!
//! Drives the router in-process and checks status codes, bodies and the
//! effect on the store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use gradebook::network::router;
use gradebook::protocol::{Ack, Student};
use gradebook::store::RecordStore;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup() -> (Arc<RecordStore>, Router) {
    let store = Arc::new(RecordStore::open_in_memory().unwrap());
    let app = router(Arc::clone(&store));
    (store, app)
}

async fn send(app: &Router, method: Method, path: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

async fn post(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, path, Some(body.to_string())).await
}

async fn list(app: &Router) -> Vec<Student> {
    let (status, body) = send(app, Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

// =============================================================================
// GET /students
// =============================================================================

#[tokio::test]
async fn test_list_empty() {
    let (_store, app) = setup();

    let (status, body) = send(&app, Method::GET, "/students", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_omits_ids() {
    let (store, app) = setup();
    store.create(Student::new("Alice", "Math", 90)).unwrap();

    let (_, body) = send(&app, Method::GET, "/students", None).await;

    assert_eq!(body, json!([{"name": "Alice", "subject": "Math", "marks": 90}]));
}

// =============================================================================
// POST /add_student
// =============================================================================

#[tokio::test]
async fn test_add_student() {
    let (_store, app) = setup();

    let (status, body) = post(
        &app,
        "/add_student",
        json!({"name": "Alice", "subject": "Math", "marks": 90}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student added"}));
    assert_eq!(list(&app).await, vec![Student::new("Alice", "Math", 90)]);
}

#[tokio::test]
async fn test_add_student_missing_marks_rejected() {
    let (store, app) = setup();

    let (status, body) = post(&app, "/add_student", json!({"name": "Alice", "subject": "Math"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let ack: Ack = serde_json::from_value(body).unwrap();
    assert!(ack.message.contains("marks"), "{}", ack.message);
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_add_student_wrong_type_rejected() {
    let (store, app) = setup();

    let (status, _) = post(
        &app,
        "/add_student",
        json!({"name": "Alice", "subject": "Math", "marks": "ninety"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_add_student_malformed_json_rejected() {
    let (store, app) = setup();

    let (status, body) = send(
        &app,
        Method::POST,
        "/add_student",
        Some("{\"name\": \"Alice\",".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("message").is_some());
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_add_student_without_body_rejected() {
    let (store, app) = setup();

    let (status, _) = send(&app, Method::POST, "/add_student", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.count().unwrap(), 0);
}

// =============================================================================
// POST /add_bulk
// =============================================================================

#[tokio::test]
async fn test_add_bulk() {
    let (_store, app) = setup();

    let (status, body) = post(
        &app,
        "/add_bulk",
        json!([
            {"name": "Alice", "subject": "Math", "marks": 90},
            {"name": "Alice", "subject": "Physics", "marks": 80},
            {"name": "Bob", "subject": "Math", "marks": 70},
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Bulk students added", "count": 3}));
    assert_eq!(list(&app).await.len(), 3);
}

#[tokio::test]
async fn test_add_bulk_with_bad_item_writes_nothing() {
    let (store, app) = setup();

    let (status, body) = post(
        &app,
        "/add_bulk",
        json!([
            {"name": "Alice", "subject": "Math", "marks": 90},
            {"name": "Bob", "subject": "Math", "marks": 70.5},
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("item 1"), "{message}");
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_add_bulk_object_rejected() {
    let (_store, app) = setup();

    let (status, _) = post(
        &app,
        "/add_bulk",
        json!({"name": "Alice", "subject": "Math", "marks": 90}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// POST /delete_student
// =============================================================================

#[tokio::test]
async fn test_delete_student() {
    let (store, app) = setup();
    store.create(Student::new("Alice", "Math", 90)).unwrap();
    store.create(Student::new("Alice", "Physics", 80)).unwrap();

    let (status, body) = post(&app, "/delete_student", json!({"name": "Alice", "subject": "Physics"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student deleted", "deleted": 1}));
    assert_eq!(list(&app).await, vec![Student::new("Alice", "Math", 90)]);
}

#[tokio::test]
async fn test_delete_missing_student_is_ok() {
    let (store, app) = setup();
    store.create(Student::new("Alice", "Math", 90)).unwrap();

    let (status, body) = post(&app, "/delete_student", json!({"name": "Zed", "subject": "Math"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], json!(0));
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn test_delete_with_empty_name_is_noop() {
    let (store, app) = setup();
    store.create(Student::new("Alice", "Math", 90)).unwrap();

    let (status, body) = post(&app, "/delete_student", json!({"name": "", "subject": "Math"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student deleted", "deleted": 0}));
    assert_eq!(list(&app).await, vec![Student::new("Alice", "Math", 90)]);
}

#[tokio::test]
async fn test_delete_missing_field_rejected() {
    let (_store, app) = setup();

    let (status, _) = post(&app, "/delete_student", json!({"name": "Alice"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Routing / CORS
// =============================================================================

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (_store, app) = setup();

    let (status, _) = send(&app, Method::GET, "/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let (_store, app) = setup();

    let (status, _) = send(&app, Method::GET, "/add_student", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let (_store, app) = setup();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/add_student")
        .header(header::ORIGIN, "http://localhost:8050")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
