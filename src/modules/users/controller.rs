use axum::{Json, extract::State, http::StatusCode};
use taskshelf_core::{AppError, ErrorEnvelope};
use taskshelf_models::params::UserIdPath;
use taskshelf_models::responses::MessageResponse;
use taskshelf_models::users::{ChangePasswordDto, PublicUser, RegisterUserDto, UpdateProfileDto};
use tracing::{instrument, warn};

use crate::metrics::track_authorization_denied;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::UserService;

pub const OWN_ACCOUNT_ONLY_MESSAGE: &str =
    "Access Denied. You can only make changes to your user account.";

/// Register a new account
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Email, username or phone number already taken", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let user = UserService::create_user(&state.db, dto.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully", user.id)),
    ))
}

/// Get the current user's account
#[utoipa::path(
    get,
    path = "/users/get_user",
    responses(
        (status = 200, description = "Current user", body = PublicUser),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 404, description = "User no longer exists", body = ErrorEnvelope)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = UserService::get_user(&state.db, auth_user.user_id()).await?;
    Ok(Json(user))
}

/// Change the current user's password
#[utoipa::path(
    post,
    path = "/users/change_password",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 401, description = "Not authenticated or old password wrong", body = ErrorEnvelope),
        (status = 422, description = "New password and confirmation differ", body = ErrorEnvelope)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = UserService::change_password(&state.db, auth_user.user_id(), dto).await?;
    Ok(Json(MessageResponse::new("Password updated successfully.", id)))
}

/// Update the current user's account details
#[utoipa::path(
    put,
    path = "/users/user/{user_id}",
    params(UserIdPath),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 403, description = "Not the caller's account", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(UserIdPath { user_id }): ValidatedPath<UserIdPath>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<MessageResponse>, AppError> {
    if auth_user.user_id() != user_id {
        warn!(caller.id = %auth_user.user_id(), user.id = %user_id, "Rejected update of another user's account");
        track_authorization_denied("user");
        return Err(AppError::forbidden(OWN_ACCOUNT_ONLY_MESSAGE));
    }

    let id = UserService::update_user(&state.db, user_id, dto.into()).await?;
    Ok(Json(MessageResponse::new("User details updated successfully", id)))
}
