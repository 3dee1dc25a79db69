use std::env;

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 20 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|expiry: &i64| *expiry > 0)
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY), // 20 minutes
        }
    }
}
