use axum::{Json, extract::State, http::StatusCode};
use taskshelf_core::{AppError, ErrorEnvelope};
use taskshelf_models::books::{Book, BookFilterParams, BookRequest, BookUpdateRequest};
use taskshelf_models::params::{AuthorPath, BookIdPath, BookTitlePath};
use taskshelf_models::responses::{BookMessageResponse, StatusMessage};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

use super::service::BookService;

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    params(BookFilterParams),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 404, description = "No book matches", body = ErrorEnvelope),
        (status = 422, description = "Invalid filter value", body = ErrorEnvelope)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn list_books(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<BookFilterParams>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = BookService::list_books(&state.books, &params).await?;
    Ok(Json(books))
}

/// Get the first book with a title
#[utoipa::path(
    get,
    path = "/books/title/{book_title}",
    params(BookTitlePath),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "No book with that title", body = ErrorEnvelope),
        (status = 422, description = "Title length out of range", body = ErrorEnvelope)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn get_book_by_title(
    State(state): State<AppState>,
    ValidatedPath(BookTitlePath { book_title }): ValidatedPath<BookTitlePath>,
) -> Result<Json<Book>, AppError> {
    let book = BookService::get_by_title(&state.books, &book_title).await?;
    Ok(Json(book))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    params(BookIdPath),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "Book not found", body = ErrorEnvelope),
        (status = 422, description = "Invalid book id", body = ErrorEnvelope)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn get_book(
    State(state): State<AppState>,
    ValidatedPath(BookIdPath { book_id }): ValidatedPath<BookIdPath>,
) -> Result<Json<Book>, AppError> {
    let book = BookService::get_by_id(&state.books, book_id).await?;
    Ok(Json(book))
}

/// List books by an author
#[utoipa::path(
    get,
    path = "/books/author/{author_name}",
    params(AuthorPath),
    responses(
        (status = 200, description = "Books by the author", body = Vec<Book>),
        (status = 404, description = "No books by that author", body = ErrorEnvelope),
        (status = 422, description = "Author length out of range", body = ErrorEnvelope)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn get_books_by_author(
    State(state): State<AppState>,
    ValidatedPath(AuthorPath { author_name }): ValidatedPath<AuthorPath>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = BookService::get_by_author(&state.books, &author_name).await?;
    Ok(Json(books))
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book added", body = BookMessageResponse),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Books"
)]
#[instrument(skip(state, request))]
pub async fn add_book(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BookRequest>,
) -> (StatusCode, Json<BookMessageResponse>) {
    let book = BookService::add_book(&state.books, request).await;
    (
        StatusCode::CREATED,
        Json(BookMessageResponse {
            message: "Book added successfully".to_string(),
            book,
        }),
    )
}

/// Replace a book
#[utoipa::path(
    put,
    path = "/books",
    request_body = BookUpdateRequest,
    responses(
        (status = 204, description = "Book replaced"),
        (status = 404, description = "Book not found", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Books"
)]
#[instrument(skip(state, request))]
pub async fn update_book(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BookUpdateRequest>,
) -> Result<StatusCode, AppError> {
    BookService::update_book(&state.books, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    params(BookIdPath),
    responses(
        (status = 200, description = "Book deleted", body = StatusMessage),
        (status = 404, description = "Book not found", body = ErrorEnvelope),
        (status = 422, description = "Invalid book id", body = ErrorEnvelope)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn delete_book(
    State(state): State<AppState>,
    ValidatedPath(BookIdPath { book_id }): ValidatedPath<BookIdPath>,
) -> Result<Json<StatusMessage>, AppError> {
    BookService::delete_book(&state.books, book_id).await?;
    Ok(Json(StatusMessage {
        message: "Book deleted successfully".to_string(),
    }))
}
