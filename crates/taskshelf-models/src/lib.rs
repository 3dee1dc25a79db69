//! # Taskshelf Models
//!
//! Database rows, request DTOs and response bodies for the Taskshelf API.
//!
//! - [`auth`]: login form and token response
//! - [`books`]: the in-memory book catalogue and its seed data
//! - [`params`]: validated path parameters
//! - [`responses`]: small confirmation bodies shared by several routes
//! - [`todos`]: to-do rows and requests
//! - [`users`]: user rows, the public user view and account DTOs
//!
//! Request DTOs derive `Validate`; the root crate's extractors run that
//! validation before a handler sees the value.

pub mod auth;
pub mod books;
pub mod params;
pub mod responses;
pub mod todos;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{TokenForm, TokenResponse};
pub use books::{Book, BookFilterParams, BookRequest, BookUpdateRequest, seed_books};
pub use params::{AuthorPath, BookIdPath, BookTitlePath, TodoIdPath, UserIdPath};
pub use responses::{BookMessageResponse, MessageResponse, StatusMessage};
pub use todos::{Todo, TodoRequest};
pub use users::{
    AdminUpdateUserDto, ChangePasswordDto, CreateUserDto, PublicUser, RegisterUserDto,
    UpdateProfileDto, User, roles,
};

/// Rejects years after the current calendar year.
pub(crate) fn validate_not_future_year(year: i32) -> Result<(), validator::ValidationError> {
    use chrono::Datelike;

    if year > chrono::Utc::now().year() {
        return Err(validator::ValidationError::new("year")
            .with_message("published_year cannot be in the future".into()));
    }
    Ok(())
}
