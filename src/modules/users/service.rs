use sqlx::PgPool;
use taskshelf_auth::INVALID_CREDENTIALS_MESSAGE;
use taskshelf_core::{AppError, hash_password, verify_password};
use taskshelf_models::users::{AdminUpdateUserDto, ChangePasswordDto, CreateUserDto, PublicUser, User};
use tracing::{debug, info, instrument, warn};

use crate::metrics::{track_user_created, track_user_deleted};

pub const USER_NOT_FOUND_MESSAGE: &str = "User Not Found.";
pub const USER_ID_NOT_FOUND_MESSAGE: &str = "User ID Not Found";

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto), fields(user.username = %dto.username, user.role = %dto.role, db.operation = "INSERT", db.table = "users"))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<PublicUser, AppError> {
        debug!("Creating user");

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, PublicUser>(
            "INSERT INTO users (email, username, first_name, last_name, hashed_password, role, phone_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, email, username, first_name, last_name, is_active, role, phone_number, created_at, updated_at",
        )
        .bind(&dto.email)
        .bind(&dto.username)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&hashed_password)
        .bind(&dto.role)
        .bind(&dto.phone_number)
        .fetch_one(db)
        .await?;

        track_user_created(&user.role);
        info!(user.id = %user.id, "User created successfully");

        Ok(user)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user(db: &PgPool, user_id: i32) -> Result<PublicUser, AppError> {
        sqlx::query_as::<_, PublicUser>(
            "SELECT id, email, username, first_name, last_name, is_active, role, phone_number, created_at, updated_at
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            warn!(user.id = %user_id, "User not found");
            AppError::not_found(USER_NOT_FOUND_MESSAGE)
        })
    }

    /// Full row including the password hash, for credential checks only.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, username, first_name, last_name, hashed_password, is_active, role,
                    phone_number, created_at, updated_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list_users(db: &PgPool) -> Result<Vec<PublicUser>, AppError> {
        let users = sqlx::query_as::<_, PublicUser>(
            "SELECT id, email, username, first_name, last_name, is_active, role, phone_number, created_at, updated_at
             FROM users ORDER BY id",
        )
        .fetch_all(db)
        .await?;

        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Applies the fields present in `dto`; absent fields keep their value.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_user(
        db: &PgPool,
        user_id: i32,
        dto: AdminUpdateUserDto,
    ) -> Result<i32, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            "UPDATE users SET
                email = COALESCE($1, email),
                username = COALESCE($2, username),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone_number = COALESCE($5, phone_number),
                role = COALESCE($6, role),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
             WHERE id = $8
             RETURNING id",
        )
        .bind(&dto.email)
        .bind(&dto.username)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.phone_number)
        .bind(&dto.role)
        .bind(dto.is_active)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            warn!(user.id = %user_id, "Attempted to update non-existent user");
            AppError::not_found(USER_NOT_FOUND_MESSAGE)
        })?;

        info!(user.id = %id, "User updated successfully");
        Ok(id)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn change_password(
        db: &PgPool,
        user_id: i32,
        dto: ChangePasswordDto,
    ) -> Result<i32, AppError> {
        let current_hash = sqlx::query_scalar::<_, String>(
            "SELECT hashed_password FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND_MESSAGE))?;

        if !verify_password(&dto.old_password, &current_hash)? {
            warn!(user.id = %user_id, "Password change rejected: old password mismatch");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let new_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET hashed_password = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_hash)
            .bind(user_id)
            .execute(db)
            .await?;

        info!(user.id = %user_id, "Password updated");
        Ok(user_id)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "users"))]
    pub async fn delete_user(db: &PgPool, user_id: i32) -> Result<i32, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            warn!(user.id = %user_id, "Attempted to delete non-existent user");
            return Err(AppError::not_found(USER_ID_NOT_FOUND_MESSAGE));
        }

        track_user_deleted();
        info!(user.id = %user_id, "User deleted successfully");
        Ok(user_id)
    }
}
