use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub complete: bool,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating a todo and for replacing one.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "title": "Learn FastAPI",
    "description": "Finish the dependency injection chapter",
    "priority": 4,
    "complete": false
}))]
pub struct TodoRequest {
    #[validate(length(min = 3, max = 255, message = "title must be between 3 and 255 characters"))]
    pub title: String,
    #[validate(length(min = 3, max = 100, message = "description must be between 3 and 100 characters"))]
    pub description: String,
    #[validate(range(min = 1, max = 5, message = "priority must be between 1 and 5"))]
    pub priority: i32,
    pub complete: bool,
}
