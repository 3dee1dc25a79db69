use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    add_book, delete_book, get_book, get_book_by_title, get_books_by_author, list_books,
    update_book,
};

pub fn init_books_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(add_book).put(update_book))
        .route("/title/{book_title}", get(get_book_by_title))
        .route("/author/{author_name}", get(get_books_by_author))
        .route("/{book_id}", get(get_book).delete(delete_book))
}
