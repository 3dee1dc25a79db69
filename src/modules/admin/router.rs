use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{create_user, delete_user, list_users, update_user};

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/user", post(create_user))
        .route("/user/{user_id}", put(update_user).delete(delete_user))
}
