//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in every access token.
///
/// - `sub`: username
/// - `id`: user id
/// - `user_role`: role name, `"admin"` grants admin routes; absent means no role
/// - `exp` / `iat`: expiry and issued-at Unix timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub id: i32,
    #[serde(default)]
    pub user_role: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.user_role.eq_ignore_ascii_case("admin")
    }
}
