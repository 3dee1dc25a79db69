use sqlx::PgPool;
use taskshelf_auth::{INVALID_CREDENTIALS_MESSAGE, create_access_token};
use taskshelf_config::JwtConfig;
use taskshelf_core::{AppError, verify_password};
use taskshelf_models::auth::{TokenForm, TokenResponse};
use taskshelf_models::users::User;
use tracing::{debug, info, instrument, warn};

use crate::metrics::{track_jwt_issued, track_user_login_failure, track_user_login_success};
use crate::modules::users::service::UserService;

pub const INACTIVE_ACCOUNT_MESSAGE: &str = "User account is inactive.";

pub struct AuthService;

impl AuthService {
    /// Returns the user when `username` exists and `password` matches its hash.
    #[instrument(skip(db, password))]
    pub async fn authenticate_user(
        db: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = UserService::find_by_username(db, username).await? else {
            debug!("Unknown username");
            return Ok(None);
        };

        if !verify_password(password, &user.hashed_password)? {
            debug!(user.id = %user.id, "Password mismatch");
            return Ok(None);
        }

        Ok(Some(user))
    }

    #[instrument(skip(db, form, jwt_config), fields(user.username = %form.username))]
    pub async fn login(
        db: &PgPool,
        form: TokenForm,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let user = Self::authenticate_user(db, &form.username, &form.password)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: invalid credentials");
                track_user_login_failure("invalid_credentials");
                AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE)
            })?;

        if !user.is_active {
            warn!(user.id = %user.id, "Login failed: account inactive");
            track_user_login_failure("inactive");
            return Err(AppError::forbidden(INACTIVE_ACCOUNT_MESSAGE));
        }

        let token = create_access_token(&user.username, user.id, &user.role, jwt_config)?;

        track_jwt_issued();
        track_user_login_success(&user.role);
        info!(user.id = %user.id, "User logged in");

        Ok(TokenResponse::bearer(token))
    }
}
