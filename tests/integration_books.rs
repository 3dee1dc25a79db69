mod common;

use axum::http::StatusCode;
use common::{body_json, json_request, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

fn new_book() -> serde_json::Value {
    json!({
        "title": "Vagabond",
        "book_description": "A fictionalized account of the life of Musashi.",
        "author": "Takehiko Inoue",
        "published_year": 1998,
        "genre": "Seinen manga",
        "rating": 5
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_books(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 8);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_books_filtered(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books?author_name=hermann%20hesse&book_rating=3", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_books_single_match_is_still_array(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books?published_year=2018", None, None)).await;
    let body = body_json(response).await;
    let books = body.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Atomic Habits");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_books_empty_filters_return_everything(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books?author_name=&book_title=", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 8);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_books_unknown_author(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books?author_name=Nobody", None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "No books found for author - Nobody");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_books_rating_out_of_range(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books?book_rating=6", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_book_by_title(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books/title/siddhartha", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_book_by_title_too_short(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books/title/ab", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_book_by_id(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books/6", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["author"], "James Clear");

    let response = send(&app, json_request("GET", "/books/99", None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["message"], "No book found with ID - '99'");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_books_by_author(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("GET", "/books/author/John%20Scalzi", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_book_assigns_next_id(pool: PgPool) {
    let app = setup_test_app(pool);

    let mut book = new_book();
    book["id"] = json!(100);

    let response = send(&app, json_request("POST", "/books", None, Some(book))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Book added successfully");
    assert_eq!(body["book"]["id"], 8);

    let response = send(&app, json_request("GET", "/books/8", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_book_future_year_rejected(pool: PgPool) {
    let app = setup_test_app(pool);

    let mut book = new_book();
    book["published_year"] = json!(9999);

    let response = send(&app, json_request("POST", "/books", None, Some(book))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_book(pool: PgPool) {
    let app = setup_test_app(pool);

    let mut book = new_book();
    book["id"] = json!(2);

    let response = send(&app, json_request("PUT", "/books", None, Some(book))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, json_request("GET", "/books/2", None, None)).await;
    assert_eq!(body_json(response).await["title"], "Vagabond");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_book(pool: PgPool) {
    let app = setup_test_app(pool);

    let mut book = new_book();
    book["id"] = json!(77);

    let response = send(&app, json_request("PUT", "/books", None, Some(book))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["message"], "No book found with ID - 77");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_book(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, json_request("DELETE", "/books/0", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Book deleted successfully");

    let response = send(&app, json_request("DELETE", "/books/0", None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
