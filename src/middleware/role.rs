//! Admin-only access control.
//!
//! Two forms of the same check:
//! 1. [`RequireAdmin`], an extractor for handlers that need the caller
//! 2. [`require_admin`], a middleware for whole routers

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use taskshelf_core::AppError;

use crate::metrics::track_authorization_denied;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const ADMIN_REQUIRED_MESSAGE: &str = "Access Denied - Admin Privilege Required";

/// An authenticated caller whose role is admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

pub fn check_admin(auth_user: &AuthUser) -> Result<(), AppError> {
    if auth_user.is_admin() {
        Ok(())
    } else {
        track_authorization_denied("admin");
        Err(AppError::forbidden(ADMIN_REQUIRED_MESSAGE))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_admin(&auth_user)?;
        Ok(RequireAdmin(auth_user))
    }
}

/// Rejects non-admin callers before the route handler runs.
///
/// ```rust,ignore
/// let admin_routes = init_admin_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    match RequireAdmin::from_request_parts(&mut parts, &state).await {
        Ok(RequireAdmin(auth_user)) => {
            parts.extensions.insert(auth_user);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(err) => err.into_response(),
    }
}
