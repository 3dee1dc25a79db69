use axum::{Json, extract::State, http::StatusCode};
use taskshelf_core::{AppError, ErrorEnvelope};
use taskshelf_models::params::TodoIdPath;
use taskshelf_models::responses::MessageResponse;
use taskshelf_models::todos::{Todo, TodoRequest};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::TodoService;

/// List todos visible to the caller
#[utoipa::path(
    get,
    path = "/todo",
    responses(
        (status = 200, description = "Own todos, or all todos for admins", body = Vec<Todo>),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope)
    ),
    tag = "Todos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_todos(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::list_todos(&state.db, &auth_user).await?;
    Ok(Json(todos))
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/todo/read_todo/{todo_id}",
    params(TodoIdPath),
    responses(
        (status = 200, description = "Todo found", body = Todo),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 403, description = "Todo belongs to another user", body = ErrorEnvelope),
        (status = 404, description = "Todo not found", body = ErrorEnvelope),
        (status = 422, description = "Invalid todo id", body = ErrorEnvelope)
    ),
    tag = "Todos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn read_todo(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(TodoIdPath { todo_id }): ValidatedPath<TodoIdPath>,
) -> Result<Json<Todo>, AppError> {
    let todo = TodoService::get_todo(&state.db, &auth_user, todo_id).await?;
    Ok(Json(todo))
}

/// Create a todo owned by the caller
#[utoipa::path(
    post,
    path = "/todo/create_todo",
    request_body = TodoRequest,
    responses(
        (status = 201, description = "Todo created", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Todos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_todo(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<TodoRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let id = TodoService::create_todo(&state.db, &auth_user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Todo item created successfully", id)),
    ))
}

/// Replace a todo's fields
#[utoipa::path(
    put,
    path = "/todo/update_todo/{todo_id}",
    params(TodoIdPath),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 403, description = "Todo belongs to another user", body = ErrorEnvelope),
        (status = 404, description = "Todo not found", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Todos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_todo(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(TodoIdPath { todo_id }): ValidatedPath<TodoIdPath>,
    ValidatedJson(dto): ValidatedJson<TodoRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = TodoService::update_todo(&state.db, &auth_user, todo_id, dto).await?;
    Ok(Json(MessageResponse::new(
        "Todo item details updated successfully",
        id,
    )))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/todo/delete_todo/{todo_id}",
    params(TodoIdPath),
    responses(
        (status = 200, description = "Todo deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 403, description = "Todo belongs to another user", body = ErrorEnvelope),
        (status = 404, description = "Todo not found", body = ErrorEnvelope),
        (status = 422, description = "Invalid todo id", body = ErrorEnvelope)
    ),
    tag = "Todos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(TodoIdPath { todo_id }): ValidatedPath<TodoIdPath>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = TodoService::delete_todo(&state.db, &auth_user, todo_id).await?;
    Ok(Json(MessageResponse::new("Todo deleted successfully", id)))
}
