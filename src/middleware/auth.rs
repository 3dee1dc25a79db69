use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use taskshelf_auth::{Claims, NOT_AUTHENTICATED_MESSAGE, verify_token};
use taskshelf_core::AppError;

use crate::state::AppState;

/// The caller identified by a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> i32 {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.sub
    }

    pub fn role(&self) -> &str {
        &self.0.user_role
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }

    /// Admins may touch any resource, everyone else only their own.
    pub fn can_access(&self, owner_id: i32) -> bool {
        self.is_admin() || self.user_id() == owner_id
    }
}

/// Returns the token from an `Authorization: Bearer <token>` header value.
/// The scheme is matched case-insensitively.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already verified by a router-level guard.
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| AppError::unauthorized(NOT_AUTHENTICATED_MESSAGE))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
