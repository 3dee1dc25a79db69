//! Admin account bootstrap.

use sqlx::PgPool;
use taskshelf_core::hash_password;
use taskshelf_models::users::roles;

pub struct NewAdmin<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

/// Inserts an active admin account. Returns `None` when the email or
/// username is already taken.
pub async fn create_admin(
    db: &PgPool,
    admin: NewAdmin<'_>,
) -> Result<Option<i32>, Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(admin.password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (email, username, first_name, last_name, hashed_password, role, is_active)
         VALUES ($1, $2, $3, $4, $5, $6, TRUE)
         ON CONFLICT DO NOTHING
         RETURNING id",
    )
    .bind(admin.email)
    .bind(admin.username)
    .bind(admin.first_name)
    .bind(admin.last_name)
    .bind(&hashed_password)
    .bind(roles::ADMIN)
    .fetch_optional(db)
    .await?;

    Ok(id)
}
