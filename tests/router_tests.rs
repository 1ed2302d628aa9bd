//! Router tests that never reach the database.
//!
//! The pool is lazy, so every request below has to be answered before
//! the first query is issued.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use library_server::{api, config::AppConfig, AppState};

fn app() -> Router {
    let config = AppConfig::default();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("lazy pool");
    api::create_router(AppState::new(config, pool))
}

async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app()
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_author_form_is_empty() {
    let (status, body) = send(Method::GET, "/api/v1/authors/create", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["author"].is_null());
}

#[tokio::test]
async fn test_create_author_rejects_blank_first_name() {
    let (status, body) = send(
        Method::POST,
        "/api/v1/authors/create",
        Some(json!({ "first_name": "   ", "age": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);
    assert!(body["message"].as_str().unwrap().contains("first_name"));
}

#[tokio::test]
async fn test_create_author_rejects_negative_age() {
    let (status, body) = send(
        Method::POST,
        "/api/v1/authors/create",
        Some(json!({ "first_name": "Ann", "age": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("age"));
}

#[tokio::test]
async fn test_edit_author_with_mismatched_id_is_not_found() {
    let (status, body) = send(
        Method::POST,
        "/api/v1/authors/edit/5",
        Some(json!({
            "id": 6,
            "row_version": 1,
            "first_name": "Ann",
            "age": 30
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 20);
}

#[tokio::test]
async fn test_edit_book_with_mismatched_id_is_not_found() {
    let (status, _) = send(
        Method::POST,
        "/api/v1/books/edit/1",
        Some(json!({
            "id": 2,
            "row_version": 1,
            "title": "Dune",
            "description": "Desert planet",
            "price": "9.99",
            "category_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_publication_with_mismatched_id_is_not_found() {
    let (status, _) = send(
        Method::POST,
        "/api/v1/publications/edit/3",
        Some(json!({
            "id": 4,
            "row_version": 1,
            "published_date": "2020-01-01T00:00:00Z",
            "author_id": 1,
            "book_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_rejects_negative_price() {
    let (status, body) = send(
        Method::POST,
        "/api/v1/books/create",
        Some(json!({
            "title": "Dune",
            "description": "Desert planet",
            "price": "-1.00",
            "category_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn test_create_book_rejects_price_that_would_be_rounded() {
    let (status, body) = send(
        Method::POST,
        "/api/v1/books/create",
        Some(json!({
            "title": "Dune",
            "description": "Desert planet",
            "price": "25.005",
            "category_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("decimal places"));
}

#[tokio::test]
async fn test_create_book_rejects_price_overflowing_column() {
    let (status, body) = send(
        Method::POST,
        "/api/v1/books/create",
        Some(json!({
            "title": "Dune",
            "description": "Desert planet",
            "price": "100000000000000000",
            "category_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);
    assert!(body["message"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn test_filter_books_rejects_malformed_category() {
    let (status, body) = send(
        Method::POST,
        "/api/v1/books",
        Some(json!({ "searchString": "dune", "category": "1,x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("category"));
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let (status, _) = send(Method::GET, "/api/v1/authors/details/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, body) = send(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Library Catalog API");
    assert!(body["paths"]["/books/edit/{id}"].is_object());
}
