use axum::{Json, extract::State, http::StatusCode};
use taskshelf_core::{AppError, ErrorEnvelope};
use taskshelf_models::params::UserIdPath;
use taskshelf_models::responses::MessageResponse;
use taskshelf_models::users::{AdminUpdateUserDto, CreateUserDto, PublicUser};
use tracing::instrument;

use crate::middleware::role::RequireAdmin;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::AdminService;

/// List all users
#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "All users", body = Vec<PublicUser>),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 403, description = "Admin privilege required", body = ErrorEnvelope)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = UserService::list_users(&state.db).await?;
    Ok(Json(users))
}

/// Create a user with any role
#[utoipa::path(
    post,
    path = "/admin/user",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Email, username or phone number already taken", body = ErrorEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 403, description = "Admin privilege required", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully", user.id)),
    ))
}

/// Update any user's details, role and status
#[utoipa::path(
    put,
    path = "/admin/user/{user_id}",
    params(UserIdPath),
    request_body = AdminUpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 403, description = "Admin privilege required", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(UserIdPath { user_id }): ValidatedPath<UserIdPath>,
    ValidatedJson(dto): ValidatedJson<AdminUpdateUserDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = UserService::update_user(&state.db, user_id, dto).await?;
    Ok(Json(MessageResponse::new("User details updated successfully", id)))
}

/// Delete a user and their todos
#[utoipa::path(
    delete,
    path = "/admin/user/{user_id}",
    params(UserIdPath),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Cannot delete own account", body = ErrorEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 403, description = "Admin privilege required", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedPath(UserIdPath { user_id }): ValidatedPath<UserIdPath>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = AdminService::delete_user(&state.db, admin.user_id(), user_id).await?;
    Ok(Json(MessageResponse::new("User details deleted successfully", id)))
}
