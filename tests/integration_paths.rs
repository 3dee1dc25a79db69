mod common;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use common::{body_json, create_test_user, json_request, test_state};
use serde_json::json;
use sqlx::PgPool;
use taskshelf::config::RateLimitConfig;
use taskshelf::router::init_app;
use tower::ServiceExt;

async fn send_app(pool: &PgPool, request: Request<Body>) -> Response<Body> {
    init_app(test_state(pool.clone(), RateLimitConfig::disabled()))
        .oneshot(request)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_trailing_slash_reaches_books(pool: PgPool) {
    let response = send_app(&pool, json_request("GET", "/books/", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 8);

    let response = send_app(&pool, json_request("GET", "/books/title/Demian/", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Demian");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_trailing_slash_reaches_protected_todos(pool: PgPool) {
    let response = send_app(&pool, json_request("GET", "/todo/", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Not authenticated");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_trailing_slash_create_todo(pool: PgPool) {
    let user = create_test_user(&pool, "slashuser", "user").await;

    let response = send_app(
        &pool,
        json_request(
            "POST",
            "/todo/create_todo/",
            Some(&user.token),
            Some(json!({
                "title": "Read the book",
                "description": "Chapter one and two",
                "priority": 2,
                "complete": false
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
