//! Extractors that deserialize and validate in one step.
//!
//! Every rejection, whether the input failed to parse or failed a
//! `Validate` rule, becomes a 422 `RequestValidationError`.

use axum::{
    Form, Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use taskshelf_core::AppError;
use taskshelf_core::errors::format_validation_errors;
use validator::Validate;

fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|errors| AppError::unprocessable(format_validation_errors(&errors)))
}

/// Pulls the field name out of serde's "missing field `x`" message.
fn missing_field(message: &str) -> Option<&str> {
    message
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if let Some(field) = missing_field(&error_msg) {
        return AppError::unprocessable(format!("{} is required", field));
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::unprocessable("Missing 'Content-Type: application/json' header");
    }

    if error_msg.contains("invalid type") {
        return AppError::unprocessable(format!("Invalid field type in request: {}", error_msg));
    }

    AppError::unprocessable(format!("Invalid request body: {}", error_msg))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        validate(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// URL-encoded form body, as posted by OAuth2 password-flow clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection: FormRejection| {
                let error_msg = rejection.body_text();
                match missing_field(&error_msg) {
                    Some(field) => AppError::unprocessable(format!("{} is required", field)),
                    None => AppError::unprocessable(format!("Invalid form data: {}", error_msg)),
                }
            })?;

        validate(&value)?;
        Ok(ValidatedForm(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                AppError::unprocessable(format!("Invalid query string: {}", rejection.body_text()))
            })?;

        validate(&value)?;
        Ok(ValidatedQuery(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                AppError::unprocessable(format!("Invalid path parameter: {}", rejection.body_text()))
            })?;

        validate(&value)?;
        Ok(ValidatedPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_extracts_name() {
        let msg = "Failed to deserialize the JSON body into the target type: missing field `title` at line 1 column 2";
        assert_eq!(missing_field(msg), Some("title"));
        assert_eq!(missing_field("expected value"), None);
    }
}
