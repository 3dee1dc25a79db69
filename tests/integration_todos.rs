mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_todo, create_test_user, json_request, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

fn todo_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Finish the ownership chapter",
        "priority": 4,
        "complete": false
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_todos_require_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/todo", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_todo(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let app = setup_test_app(pool.clone());

    let response = send(&app, json_request("POST", "/todo/create_todo", Some(&user.token), Some(todo_body("Learn Rust")))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Todo item created successfully");

    let owner_id = sqlx::query_scalar::<_, i32>("SELECT owner_id FROM todos WHERE id = $1")
        .bind(body["id"].as_i64().unwrap() as i32)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(owner_id, user.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_todo_validation(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let app = setup_test_app(pool);

    let mut body = todo_body("ab");
    body["priority"] = json!(9);

    let response = send(&app, json_request("POST", "/todo/create_todo", Some(&user.token), Some(body))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "RequestValidationError");
    assert_eq!(
        body["error"]["message"],
        "priority must be between 1 and 5; title must be between 3 and 255 characters"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_todos_scoped_to_owner(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let other = create_test_user(&pool, "another", "user").await;
    create_test_todo(&pool, user.id, "Mine one").await;
    create_test_todo(&pool, user.id, "Mine two").await;
    create_test_todo(&pool, other.id, "Theirs").await;
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/todo", Some(&user.token), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|todo| todo["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Mine one", "Mine two"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_all_todos(pool: PgPool) {
    let admin = create_test_user(&pool, "root", "admin").await;
    let user = create_test_user(&pool, "siddhant", "user").await;
    create_test_todo(&pool, user.id, "Mine one").await;
    create_test_todo(&pool, admin.id, "Admin todo").await;
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/todo", Some(&admin.token), None)).await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_read_todo_of_other_user_forbidden(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let other = create_test_user(&pool, "another", "user").await;
    let todo_id = create_test_todo(&pool, other.id, "Theirs").await;
    let app = setup_test_app(pool);

    let uri = format!("/todo/read_todo/{}", todo_id);
    let response = send(&app, json_request("GET", &uri, Some(&user.token), None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "You are not allowed to view this todo.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_reads_any_todo(pool: PgPool) {
    let admin = create_test_user(&pool, "root", "admin").await;
    let user = create_test_user(&pool, "siddhant", "user").await;
    let todo_id = create_test_todo(&pool, user.id, "Mine one").await;
    let app = setup_test_app(pool);

    let uri = format!("/todo/read_todo/{}", todo_id);
    let response = send(&app, json_request("GET", &uri, Some(&admin.token), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["owner_id"], user.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_read_missing_todo(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/todo/read_todo/4242", Some(&user.token), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Todo Not Found.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_read_todo_rejects_zero_id(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/todo/read_todo/0", Some(&user.token), None)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_todo(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let todo_id = create_test_todo(&pool, user.id, "Mine one").await;
    let app = setup_test_app(pool.clone());

    let mut body = todo_body("Renamed todo");
    body["complete"] = json!(true);

    let uri = format!("/todo/update_todo/{}", todo_id);
    let response = send(&app, json_request("PUT", &uri, Some(&user.token), Some(body))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Todo item details updated successfully");

    let (title, complete) =
        sqlx::query_as::<_, (String, bool)>("SELECT title, complete FROM todos WHERE id = $1")
            .bind(todo_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(title, "Renamed todo");
    assert!(complete);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_todo_of_other_user_forbidden(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let other = create_test_user(&pool, "another", "user").await;
    let todo_id = create_test_todo(&pool, other.id, "Theirs").await;
    let app = setup_test_app(pool);

    let uri = format!("/todo/update_todo/{}", todo_id);
    let response = send(&app, json_request("PUT", &uri, Some(&user.token), Some(todo_body("Hijacked")))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "You are not allowed to update this todo.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_todo(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let todo_id = create_test_todo(&pool, user.id, "Mine one").await;
    let app = setup_test_app(pool);

    let uri = format!("/todo/delete_todo/{}", todo_id);
    let response = send(&app, json_request("DELETE", &uri, Some(&user.token), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Todo deleted successfully");
    assert_eq!(body["id"], todo_id);

    let response = send(&app, json_request("GET", &format!("/todo/read_todo/{}", todo_id), Some(&user.token), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_todo_of_other_user_forbidden(pool: PgPool) {
    let user = create_test_user(&pool, "siddhant", "user").await;
    let other = create_test_user(&pool, "another", "user").await;
    let todo_id = create_test_todo(&pool, other.id, "Theirs").await;
    let app = setup_test_app(pool);

    let uri = format!("/todo/delete_todo/{}", todo_id);
    let response = send(&app, json_request("DELETE", &uri, Some(&user.token), None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "You are not allowed to delete this todo.");
}
