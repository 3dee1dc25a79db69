use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use taskshelf_config::RateLimitConfig;
use tower_governor::GovernorLayer;

use crate::state::AppState;

use super::controller::{list_users, login_for_access_token};

pub fn init_auth_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let token_router = Router::new().route("/token", post(login_for_access_token));

    let token_router = match rate_limit.auth_governor_config() {
        Some(config) => token_router.layer(GovernorLayer::new(Arc::new(config))),
        None => token_router,
    };

    Router::new()
        .merge(token_router)
        .route("/users", get(list_users))
}
