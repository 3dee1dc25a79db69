//! Path parameters. Each is validated like a request body.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct UserIdPath {
    #[validate(range(min = 1, message = "user_id must be greater than 0"))]
    pub user_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct TodoIdPath {
    #[validate(range(min = 1, message = "todo_id must be greater than 0"))]
    pub todo_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct BookIdPath {
    pub book_id: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct BookTitlePath {
    #[validate(length(min = 3, max = 200, message = "book_title must be between 3 and 200 characters"))]
    pub book_title: String,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct AuthorPath {
    #[validate(length(min = 3, max = 100, message = "author_name must be between 3 and 100 characters"))]
    pub author_name: String,
}
