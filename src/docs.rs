use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use taskshelf_core::{ErrorDetail, ErrorEnvelope, ErrorKind};
use taskshelf_models::auth::{TokenForm, TokenResponse};
use taskshelf_models::books::{Book, BookFilterParams, BookRequest, BookUpdateRequest};
use taskshelf_models::responses::{BookMessageResponse, MessageResponse, StatusMessage};
use taskshelf_models::todos::{Todo, TodoRequest};
use taskshelf_models::users::{
    AdminUpdateUserDto, ChangePasswordDto, CreateUserDto, PublicUser, RegisterUserDto,
    UpdateProfileDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_for_access_token,
        crate::modules::auth::controller::list_users,
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::change_password,
        crate::modules::users::controller::update_user,
        crate::modules::admin::controller::list_users,
        crate::modules::admin::controller::create_user,
        crate::modules::admin::controller::update_user,
        crate::modules::admin::controller::delete_user,
        crate::modules::todos::controller::list_todos,
        crate::modules::todos::controller::read_todo,
        crate::modules::todos::controller::create_todo,
        crate::modules::todos::controller::update_todo,
        crate::modules::todos::controller::delete_todo,
        crate::modules::books::controller::list_books,
        crate::modules::books::controller::get_book_by_title,
        crate::modules::books::controller::get_book,
        crate::modules::books::controller::get_books_by_author,
        crate::modules::books::controller::add_book,
        crate::modules::books::controller::update_book,
        crate::modules::books::controller::delete_book,
    ),
    components(
        schemas(
            TokenForm,
            TokenResponse,
            PublicUser,
            RegisterUserDto,
            CreateUserDto,
            UpdateProfileDto,
            AdminUpdateUserDto,
            ChangePasswordDto,
            Todo,
            TodoRequest,
            Book,
            BookRequest,
            BookUpdateRequest,
            BookFilterParams,
            MessageResponse,
            StatusMessage,
            BookMessageResponse,
            ErrorEnvelope,
            ErrorDetail,
            ErrorKind,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance"),
        (name = "Users", description = "Self-service account endpoints"),
        (name = "Admin", description = "User management for administrators"),
        (name = "Todos", description = "Per-user to-do items"),
        (name = "Books", description = "In-memory book catalogue")
    ),
    info(
        title = "Taskshelf API",
        version = "0.1.0",
        description = "Book catalogue and multi-user to-do API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
