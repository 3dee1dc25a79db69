//! User models and DTOs.
//!
//! [`User`] is the full database row and carries the password hash, so it
//! never leaves the service layer. Every response uses [`PublicUser`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub role: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub role: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            role: user.role,
            phone_number: user.phone_number,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Self-service registration. The role is always `user`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "email": "siddharth13101999singh@gmail.com",
    "username": "Wolverine1310",
    "first_name": "Siddharth",
    "last_name": "Singh",
    "password": "Sid1310@",
    "phone_number": "+91-9876543210"
}))]
pub struct RegisterUserDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 3, max = 255, message = "username must be between 3 and 255 characters"))]
    pub username: String,
    #[validate(length(min = 3, max = 255, message = "first_name must be between 3 and 255 characters"))]
    pub first_name: String,
    #[validate(length(min = 3, max = 255, message = "last_name must be between 3 and 255 characters"))]
    pub last_name: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 7, max = 32, message = "phone_number must be between 7 and 32 characters"))]
    pub phone_number: Option<String>,
}

/// Admin-side creation, with an explicit role.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 3, max = 255, message = "username must be between 3 and 255 characters"))]
    pub username: String,
    #[validate(length(min = 3, max = 255, message = "first_name must be between 3 and 255 characters"))]
    pub first_name: String,
    #[validate(length(min = 3, max = 255, message = "last_name must be between 3 and 255 characters"))]
    pub last_name: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 3, max = 255, message = "role must be between 3 and 255 characters"))]
    pub role: String,
    #[validate(length(min = 7, max = 32, message = "phone_number must be between 7 and 32 characters"))]
    pub phone_number: Option<String>,
}

impl From<RegisterUserDto> for CreateUserDto {
    fn from(dto: RegisterUserDto) -> Self {
        Self {
            email: dto.email,
            username: dto.username,
            first_name: dto.first_name,
            last_name: dto.last_name,
            password: dto.password,
            role: roles::USER.to_string(),
            phone_number: dto.phone_number,
        }
    }
}

/// Partial update of one's own account. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 255, message = "username must be between 3 and 255 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 3, max = 255, message = "first_name must be between 3 and 255 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 3, max = 255, message = "last_name must be between 3 and 255 characters"))]
    pub last_name: Option<String>,
    #[validate(length(min = 7, max = 32, message = "phone_number must be between 7 and 32 characters"))]
    pub phone_number: Option<String>,
}

/// Partial update performed by an admin; may also change role and status.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AdminUpdateUserDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 255, message = "username must be between 3 and 255 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 3, max = 255, message = "first_name must be between 3 and 255 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 3, max = 255, message = "last_name must be between 3 and 255 characters"))]
    pub last_name: Option<String>,
    #[validate(length(min = 7, max = 32, message = "phone_number must be between 7 and 32 characters"))]
    pub phone_number: Option<String>,
    #[validate(length(min = 3, max = 255, message = "role must be between 3 and 255 characters"))]
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateProfileDto> for AdminUpdateUserDto {
    fn from(dto: UpdateProfileDto) -> Self {
        Self {
            email: dto.email,
            username: dto.username,
            first_name: dto.first_name,
            last_name: dto.last_name,
            phone_number: dto.phone_number,
            role: None,
            is_active: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "passwords_match", skip_on_field_errors = false))]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "old_password is required"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "new_password must be at least 8 characters"))]
    pub new_password: String,
    pub confirm_new_password: String,
}

fn passwords_match(dto: &ChangePasswordDto) -> Result<(), ValidationError> {
    if dto.new_password != dto.confirm_new_password {
        return Err(ValidationError::new("password_mismatch")
            .with_message("New password and confirmation password do not match.".into()));
    }
    Ok(())
}
