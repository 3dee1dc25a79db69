//! Request extractors and middleware.
//!
//! - [`auth`]: the [`auth::AuthUser`] bearer-token extractor
//! - [`role`]: admin-only guards
//! - [`error_path`]: completes error envelopes with the request URL
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies the JWT and exposes its claims
//! 3. `RequireAdmin` additionally demands the admin role
//! 4. Handlers check record ownership with [`auth::AuthUser::can_access`]
//!
//! ```ignore
//! async fn get_user(auth_user: AuthUser) -> Result<Json<PublicUser>, AppError> {
//!     let user = UserService::get_user(&state.db, auth_user.user_id()).await?;
//!     Ok(Json(user))
//! }
//! ```

pub mod auth;
pub mod error_path;
pub mod role;
