use sqlx::PgPool;
use taskshelf_core::AppError;
use taskshelf_models::todos::{Todo, TodoRequest};
use tracing::{debug, info, instrument, warn};

use crate::metrics::{track_authorization_denied, track_todo_operation};
use crate::middleware::auth::AuthUser;

pub const TODO_NOT_FOUND_MESSAGE: &str = "Todo Not Found.";

const TODO_COLUMNS: &str =
    "id, title, description, priority, complete, owner_id, created_at, updated_at";

pub struct TodoService;

impl TodoService {
    /// Admins see every todo, everyone else only their own.
    #[instrument(skip(db, caller), fields(user.id = %caller.user_id(), db.operation = "SELECT", db.table = "todos"))]
    pub async fn list_todos(db: &PgPool, caller: &AuthUser) -> Result<Vec<Todo>, AppError> {
        let todos = if caller.is_admin() {
            sqlx::query_as::<_, Todo>(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id"))
                .fetch_all(db)
                .await?
        } else {
            sqlx::query_as::<_, Todo>(&format!(
                "SELECT {TODO_COLUMNS} FROM todos WHERE owner_id = $1 ORDER BY id"
            ))
            .bind(caller.user_id())
            .fetch_all(db)
            .await?
        };

        debug!(count = todos.len(), "Fetched todos");
        Ok(todos)
    }

    /// Fetches a todo the caller may act on. `action` names the attempted
    /// operation in the 403 message.
    async fn find_accessible(
        db: &PgPool,
        caller: &AuthUser,
        todo_id: i32,
        action: &str,
    ) -> Result<Todo, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE id = $1"
        ))
        .bind(todo_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            warn!(todo.id = %todo_id, "Todo not found");
            AppError::not_found(TODO_NOT_FOUND_MESSAGE)
        })?;

        if !caller.can_access(todo.owner_id) {
            warn!(todo.id = %todo_id, user.id = %caller.user_id(), "Todo access denied");
            track_authorization_denied("todo");
            return Err(AppError::forbidden(format!(
                "You are not allowed to {action} this todo."
            )));
        }

        Ok(todo)
    }

    #[instrument(skip(db, caller), fields(user.id = %caller.user_id(), db.operation = "SELECT", db.table = "todos"))]
    pub async fn get_todo(db: &PgPool, caller: &AuthUser, todo_id: i32) -> Result<Todo, AppError> {
        Self::find_accessible(db, caller, todo_id, "view").await
    }

    #[instrument(skip(db, caller, dto), fields(user.id = %caller.user_id(), db.operation = "INSERT", db.table = "todos"))]
    pub async fn create_todo(
        db: &PgPool,
        caller: &AuthUser,
        dto: TodoRequest,
    ) -> Result<i32, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO todos (title, description, priority, complete, owner_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.priority)
        .bind(dto.complete)
        .bind(caller.user_id())
        .fetch_one(db)
        .await?;

        track_todo_operation("create");
        info!(todo.id = %id, "Todo created");
        Ok(id)
    }

    #[instrument(skip(db, caller, dto), fields(user.id = %caller.user_id(), db.operation = "UPDATE", db.table = "todos"))]
    pub async fn update_todo(
        db: &PgPool,
        caller: &AuthUser,
        todo_id: i32,
        dto: TodoRequest,
    ) -> Result<i32, AppError> {
        let todo = Self::find_accessible(db, caller, todo_id, "update").await?;

        sqlx::query(
            "UPDATE todos SET title = $1, description = $2, priority = $3, complete = $4,
                updated_at = NOW()
             WHERE id = $5",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.priority)
        .bind(dto.complete)
        .bind(todo.id)
        .execute(db)
        .await?;

        track_todo_operation("update");
        info!(todo.id = %todo.id, "Todo updated");
        Ok(todo.id)
    }

    #[instrument(skip(db, caller), fields(user.id = %caller.user_id(), db.operation = "DELETE", db.table = "todos"))]
    pub async fn delete_todo(db: &PgPool, caller: &AuthUser, todo_id: i32) -> Result<i32, AppError> {
        let todo = Self::find_accessible(db, caller, todo_id, "delete").await?;

        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo.id)
            .execute(db)
            .await?;

        track_todo_operation("delete");
        info!(todo.id = %todo.id, "Todo deleted");
        Ok(todo.id)
    }
}
