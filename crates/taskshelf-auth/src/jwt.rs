//! Access token creation and verification.
//!
//! Tokens use the default HS256 header and the default validation, which
//! requires and checks `exp`. Any failure to verify becomes a 401 with the
//! same message, so callers cannot tell a forged token from an expired one.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use taskshelf_config::JwtConfig;
use taskshelf_core::AppError;

use crate::claims::Claims;

/// Returned for bad credentials and for tokens that fail verification.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Could not validate user.";

/// Returned when a protected route is called without a bearer token.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated";

/// Creates a signed access token for the given user.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
///
/// # Example
///
/// ```ignore
/// let token = create_access_token(&user.username, user.id, &user.role, &jwt_config)?;
/// ```
pub fn create_access_token(
    username: &str,
    user_id: i32,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: username.to_string(),
        id: user_id,
        user_role: role.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the claims.
///
/// # Errors
///
/// Returns a 401 [`AppError`] if the token is malformed, expired, signed with
/// another secret, or lacks a username.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE))?;

    if claims.sub.trim().is_empty() {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
    }

    Ok(claims)
}
