//! # Taskshelf Auth
//!
//! JWT access tokens for the Taskshelf API.
//!
//! - [`claims`]: the claim set carried by every access token
//! - [`jwt`]: token creation and verification
//!
//! Tokens are HS256-signed with `JWT_SECRET` and carry the username, the
//! user id and the role, so request handlers can authorize without a
//! database round trip.
//!
//! # Example
//!
//! ```ignore
//! use taskshelf_auth::{create_access_token, verify_token};
//! use taskshelf_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//!
//! let token = create_access_token("siddhant", 1, "admin", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, "siddhant");
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{
    INVALID_CREDENTIALS_MESSAGE, NOT_AUTHENTICATED_MESSAGE, create_access_token, verify_token,
};
