use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{change_password, get_user, register_user, update_user};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_user))
        .route("/get_user", get(get_user))
        .route("/change_password", post(change_password))
        .route("/user/{user_id}", put(update_user))
}
