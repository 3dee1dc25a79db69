#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use taskshelf::config::{CorsConfig, JwtConfig, RateLimitConfig};
use taskshelf::modules::books::store::BookStore;
use taskshelf::router::init_router;
use taskshelf::state::AppState;
use taskshelf::taskshelf_auth::create_access_token;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "Sid1310@";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 1200,
    }
}

pub fn test_state(pool: PgPool, rate_limit_config: RateLimitConfig) -> AppState {
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        rate_limit_config,
        books: BookStore::seeded(),
    }
}

/// Router with rate limiting off and a freshly seeded book catalogue.
pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool, RateLimitConfig::disabled()))
}

pub struct TestUser {
    pub id: i32,
    pub username: String,
    pub token: String,
}

/// Inserts a user directly and issues a token for it.
pub async fn create_test_user(pool: &PgPool, username: &str, role: &str) -> TestUser {
    let hashed = bcrypt::hash(TEST_PASSWORD, 4).unwrap();

    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (email, username, first_name, last_name, hashed_password, role)
         VALUES ($1, $2, 'Test', 'User', $3, $4)
         RETURNING id",
    )
    .bind(format!("{}@test.com", username))
    .bind(username)
    .bind(&hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = create_access_token(username, id, role, &test_jwt_config()).unwrap();

    TestUser {
        id,
        username: username.to_string(),
        token,
    }
}

pub async fn create_test_todo(pool: &PgPool, owner_id: i32, title: &str) -> i32 {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO todos (title, description, priority, complete, owner_id)
         VALUES ($1, 'Some description', 3, false, $2)
         RETURNING id",
    )
    .bind(title)
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
