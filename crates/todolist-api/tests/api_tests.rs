//! Router-level tests driven through tower's `oneshot`, running against
//! the in-memory backend so each test owns an isolated store.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use todolist_api::{app, AppState};
use todolist_core::memory::MemoryRepository;
use todolist_core::service::TaskService;
use tower::ServiceExt;

fn test_app() -> Router {
    let repository = Arc::new(MemoryRepository::new());
    app(AppState::new(TaskService::new(repository)))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_task(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, "/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json
}

#[tokio::test]
async fn create_task_returns_201_with_defaults() {
    let app = test_app();

    let task = create_task(&app, json!({ "title": "Buy groceries" })).await;

    assert_eq!(task["title"], "Buy groceries");
    assert_eq!(task["priority"], 2);
    assert_eq!(task["is_completed"], false);
    assert_eq!(task["is_overdue"], false);
    assert_eq!(task["completed_at"], Value::Null);
    assert_eq!(task["category"], Value::Null);
    assert!(task["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn create_task_resolves_category() {
    let app = test_app();

    let task = create_task(
        &app,
        json!({ "title": "Write report", "category_name": "Work", "priority": 3 }),
    )
    .await;

    assert_eq!(task["priority"], 3);
    assert_eq!(task["category"]["name"], "Work");

    // Same name maps to the same category.
    let again = create_task(
        &app,
        json!({ "title": "Another one", "category_name": "Work" }),
    )
    .await;
    assert_eq!(task["category"]["id"], again["category"]["id"]);
}

#[tokio::test]
async fn create_task_validation_errors() {
    let app = test_app();

    let (status, body) = send(&app, Method::POST, "/tasks", Some(json!({ "title": "ab" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("title"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "title": "Valid title", "priority": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("priority"));
}

#[tokio::test]
async fn get_task_not_found() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/tasks/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn patch_updates_and_clears_fields() {
    let app = test_app();

    let task = create_task(
        &app,
        json!({
            "title": "Initial title",
            "description": "Initial description",
            "category_name": "Home"
        }),
    )
    .await;
    let id = task["id"].as_i64().unwrap();

    // Absent fields are untouched.
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/tasks/{id}"),
        Some(json!({ "title": "New title" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "New title");
    assert_eq!(updated["description"], "Initial description");
    assert_eq!(updated["category"]["name"], "Home");

    // Explicit nulls clear.
    let (status, cleared) = send(
        &app,
        Method::PATCH,
        &format!("/tasks/{id}"),
        Some(json!({ "description": null, "category_name": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["description"], Value::Null);
    assert_eq!(cleared["category"], Value::Null);
    assert_eq!(cleared["title"], "New title");
}

#[tokio::test]
async fn patch_missing_task_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/tasks/42",
        Some(json!({ "title": "Does not matter" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn complete_is_idempotent() {
    let app = test_app();

    let task = create_task(&app, json!({ "title": "Call dentist" })).await;
    let id = task["id"].as_i64().unwrap();

    let (status, done) = send(&app, Method::PATCH, &format!("/tasks/{id}/complete"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["is_completed"], true);
    let completed_at = done["completed_at"].clone();
    assert_ne!(completed_at, Value::Null);

    // A second completion changes nothing.
    let (status, again) = send(&app, Method::PATCH, &format!("/tasks/{id}/complete"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["completed_at"], completed_at);

    let (status, _) = send(&app, Method::PATCH, "/tasks/99/complete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_task_204_then_404() {
    let app = test_app();

    let task = create_task(&app, json!({ "title": "Throwaway" })).await;
    let id = task["id"].as_i64().unwrap();

    let (status, _) = send(&app, Method::DELETE, &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_supports_filters_and_search() {
    let app = test_app();

    create_task(&app, json!({ "title": "Water the plants" })).await;
    let report = create_task(&app, json!({ "title": "Write report" })).await;
    send(
        &app,
        Method::PATCH,
        &format!("/tasks/{}/complete", report["id"]),
        None,
    )
    .await;

    let (status, all) = send(&app, Method::GET, "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, completed) = send(&app, Method::GET, "/tasks?completed=true", None).await;
    let completed = completed.as_array().unwrap().clone();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["title"], "Write report");

    let (_, found) = send(&app, Method::GET, "/tasks?q=PLANTS", None).await;
    let found = found.as_array().unwrap().clone();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Water the plants");
}

#[tokio::test]
async fn list_pagination_covers_all_without_overlap() {
    let app = test_app();

    for i in 0..15 {
        create_task(&app, json!({ "title": format!("Task number {i}") })).await;
    }

    let (_, first) = send(&app, Method::GET, "/tasks?skip=0&limit=10", None).await;
    let (_, second) = send(&app, Method::GET, "/tasks?skip=10&limit=10", None).await;
    let first = first.as_array().unwrap().clone();
    let second = second.as_array().unwrap().clone();

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 5);

    let mut ids: Vec<i64> = first
        .iter()
        .chain(second.iter())
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    let total = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), total);

    let (status, body) = send(&app, Method::GET, "/tasks?limit=101", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn stats_reports_consistent_totals() {
    let app = test_app();

    create_task(&app, json!({ "title": "Pending task" })).await;
    create_task(
        &app,
        json!({ "title": "Overdue task", "due_date": "2024-01-01T00:00:00Z" }),
    )
    .await;
    let done = create_task(&app, json!({ "title": "Done task" })).await;
    send(
        &app,
        Method::PATCH,
        &format!("/tasks/{}/complete", done["id"]),
        None,
    )
    .await;

    let (status, stats) = send(&app, Method::GET, "/tasks/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["pending"], 2);
    assert_eq!(stats["overdue"], 1);
}

#[tokio::test]
async fn category_listing_and_deletion() {
    let app = test_app();

    let task = create_task(
        &app,
        json!({ "title": "Tagged task", "category_name": "Errands" }),
    )
    .await;
    let category_id = task["category"]["id"].as_i64().unwrap();

    let (status, categories) = send(&app, Method::GET, "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let categories = categories.as_array().unwrap().clone();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Errands");
    assert_eq!(categories[0]["task_count"], 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/categories/{category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The task survives, detached from the deleted category.
    let (_, fetched) = send(&app, Method::GET, &format!("/tasks/{}", task["id"]), None).await;
    assert_eq!(fetched["category"], Value::Null);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/categories/{category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
