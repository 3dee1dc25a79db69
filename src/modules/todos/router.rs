use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{create_todo, delete_todo, list_todos, read_todo, update_todo};

pub fn init_todos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos))
        .route("/read_todo/{todo_id}", get(read_todo))
        .route("/create_todo", post(create_todo))
        .route("/update_todo/{todo_id}", put(update_todo))
        .route("/delete_todo/{todo_id}", delete(delete_todo))
}
