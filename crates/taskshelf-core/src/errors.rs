//! Application error type and the JSON error envelope.
//!
//! Every failure that leaves the API is rendered as
//!
//! ```json
//! { "error": { "type": "HTTPException", "message": "Todo Not Found.", "path": "/todo/read_todo/7" } }
//! ```
//!
//! [`AppError`] knows the status, the error category and the message, but not
//! the request it is answering. It therefore renders `path` as `null` and
//! leaves a copy of the [`ErrorDetail`] in the response extensions, where the
//! router's error-path middleware picks it up and fills in the request URL.
//!
//! # Categories
//!
//! | [`ErrorKind`] | `type` | status |
//! |---------------|--------|--------|
//! | `Http` | `HTTPException` | any 4xx raised by handlers or extractors |
//! | `Validation` | `RequestValidationError` | 422 |
//! | `Integrity` | `IntegrityError` | 400, from database constraint violations |
//! | `Internal` | `InternalServerError` | 500, message is always generic |

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message returned for every 500, whatever the underlying cause.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Message returned for constraint violations that cannot be attributed to a column.
pub const INTEGRITY_ERROR_MESSAGE: &str = "Database constraint failed (duplicate or invalid data).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ErrorKind {
    #[serde(rename = "HTTPException")]
    Http,
    #[serde(rename = "RequestValidationError")]
    Validation,
    #[serde(rename = "IntegrityError")]
    Integrity,
    #[serde(rename = "InternalServerError")]
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Http => "HTTPException",
            ErrorKind::Validation => "RequestValidationError",
            ErrorKind::Integrity => "IntegrityError",
            ErrorKind::Internal => "InternalServerError",
        }
    }
}

/// The `error` object of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    /// Builds an error for an arbitrary status. 5xx statuses are classified
    /// as internal, everything else as an HTTP exception.
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        let kind = if status.is_server_error() {
            ErrorKind::Internal
        } else {
            ErrorKind::Http
        };

        Self {
            status,
            kind,
            error: err.into(),
        }
    }

    fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, anyhow!(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow!(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::http(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::http(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::http(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::http(StatusCode::FORBIDDEN, message)
    }

    pub fn method_not_allowed() -> Self {
        Self::http(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            kind: ErrorKind::Validation,
            error: anyhow!(message.into()),
        }
    }

    /// A constraint violation. `message` is what the client sees; `source`
    /// is kept for the log.
    pub fn integrity<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: ErrorKind::Integrity,
            error: source.into().context(message.into()),
        }
    }

    /// The message sent to the client.
    pub fn message(&self) -> String {
        match self.kind {
            ErrorKind::Internal => INTERNAL_ERROR_MESSAGE.to_string(),
            _ => self.error.to_string(),
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            kind: self.kind,
            message: self.message(),
            path: None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:#}", self.kind.as_str(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.kind {
            ErrorKind::Internal => {
                error!(status = %self.status.as_u16(), error = %format!("{:#}", self.error), "Unhandled exception");
            }
            ErrorKind::Integrity => {
                error!(error = %format!("{:#}", self.error), "IntegrityError");
            }
            ErrorKind::Validation => {
                warn!(message = %self.error, "ValidationError");
            }
            ErrorKind::Http => {
                warn!(status = %self.status.as_u16(), message = %self.error, "HTTPException");
            }
        }

        let detail = self.detail();
        let mut response = (
            self.status,
            Json(ErrorEnvelope {
                error: detail.clone(),
            }),
        )
            .into_response();

        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response.extensions_mut().insert(detail);
        response
    }
}

/// Recovers the column from a unique constraint named `{table}_{column}_key`.
pub fn unique_column(constraint: &str) -> Option<&str> {
    let trimmed = constraint.strip_suffix("_key")?;
    let (_, column) = trimmed.split_once('_')?;
    (!column.is_empty()).then_some(column)
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let message = match db_err.constraint().and_then(unique_column) {
                    Some(column) => format!(
                        "The value for '{column}' already exists. Please choose a different {column}."
                    ),
                    None => INTEGRITY_ERROR_MESSAGE.to_string(),
                };
                return AppError::integrity(message, err);
            }

            if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
                return AppError::integrity(INTEGRITY_ERROR_MESSAGE, err);
            }
        }

        AppError::internal(err)
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::internal(err)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::internal(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::unprocessable(format_validation_errors(&errors))
    }
}

/// Flattens validator output into one `"; "`-joined message, ordered by field.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
