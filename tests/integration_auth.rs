mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{TEST_PASSWORD, body_json, create_test_user, json_request, send, setup_test_app, test_jwt_config};
use sqlx::PgPool;
use taskshelf::taskshelf_auth::verify_token;

fn token_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "grant_type=password&username={}&password={}",
            username, password
        )))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let app = setup_test_app(pool);

    let response = send(&app, token_request("siddhant", TEST_PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");

    let claims = verify_token(body["access_token"].as_str().unwrap(), &test_jwt_config()).unwrap();
    assert_eq!(claims.sub, "siddhant");
    assert_eq!(claims.id, user.id);
    assert_eq!(claims.user_role, "user");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_test_user(&pool, "siddhant", "user").await;
    let app = setup_test_app(pool);

    let response = send(&app, token_request("siddhant", "wrong-password")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "HTTPException");
    assert_eq!(body["error"]["message"], "Could not validate user.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, token_request("nobody", TEST_PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let user = create_test_user(&pool, "dormant", "user").await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = setup_test_app(pool);

    let response = send(&app, token_request("dormant", TEST_PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "User account is inactive.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_password_is_validation_error(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=siddhant"))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "RequestValidationError");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_requires_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/auth/users", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Not authenticated");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_rejects_garbage_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/auth/users", Some("not-a-jwt"), None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Could not validate user.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_hides_password_hash(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    create_test_user(&pool, "another", "user").await;
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/auth/users", Some(&user.token), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("hashed_password").is_none()));
}
