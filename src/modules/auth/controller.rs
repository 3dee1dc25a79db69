use axum::{Json, extract::State};
use taskshelf_core::{AppError, ErrorEnvelope};
use taskshelf_models::auth::{TokenForm, TokenResponse};
use taskshelf_models::users::PublicUser;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedForm;

use super::service::AuthService;

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/auth/token",
    request_body(content = TokenForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope),
        (status = 403, description = "Account inactive", body = ErrorEnvelope),
        (status = 422, description = "Missing form fields", body = ErrorEnvelope),
        (status = 429, description = "Too many login attempts", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, form))]
pub async fn login_for_access_token(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<TokenForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::login(&state.db, form, &state.jwt_config).await?;
    Ok(Json(response))
}

/// List all users
#[utoipa::path(
    get,
    path = "/auth/users",
    responses(
        (status = 200, description = "All users", body = Vec<PublicUser>),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = UserService::list_users(&state.db).await?;
    Ok(Json(users))
}
