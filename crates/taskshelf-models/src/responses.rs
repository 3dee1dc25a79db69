use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::books::Book;

/// Confirmation returned by user and todo mutations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    pub id: i32,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>, id: i32) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookMessageResponse {
    pub message: String,
    pub book: Book,
}
